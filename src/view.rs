// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Search, genre filter, sort and pagination over the catalog.
//!
//! Everything here is pure: the inputs live in [`ViewState`], changes go
//! through [`reduce`], and the derived lists are recomputed from scratch.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::catalog::PodcastSummary;
use crate::error::ParseSortError;

/// Number of podcasts per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Shown when the filters match nothing
pub const NO_RESULTS_MESSAGE: &str = "No podcasts found matching your criteria.";

/// Ordering applied to the filtered catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    /// Most recently updated first
    Latest,
    /// Least recently updated first
    Oldest,
    /// Title A to Z
    TitleAsc,
    /// Title Z to A
    TitleDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Latest,
        SortOption::Oldest,
        SortOption::TitleAsc,
        SortOption::TitleDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Latest => "latest",
            SortOption::Oldest => "oldest",
            SortOption::TitleAsc => "title-asc",
            SortOption::TitleDesc => "title-desc",
        }
    }

    fn compare(self, a: &PodcastSummary, b: &PodcastSummary) -> Ordering {
        match self {
            SortOption::Latest => b.updated_at.cmp(&a.updated_at),
            SortOption::Oldest => a.updated_at.cmp(&b.updated_at),
            SortOption::TitleAsc => compare_titles(&a.title, &b.title),
            SortOption::TitleDesc => compare_titles(&b.title, &a.title),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSortError(s.to_string()))
    }
}

/// Title comparison that ignores accents and case first, then case alone,
/// and finally uses the exact text as a tie-break, so "Éclair" sorts
/// between "Apple" and "Zebra" and "apple" next to "Apple".
fn compare_titles(a: &str, b: &str) -> Ordering {
    title_sort_key(a)
        .cmp(&title_sort_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Lowercased title with combining marks removed after decomposition
fn title_sort_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Inputs driving the catalog view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub selected_genre: Option<u32>,
    pub sort: Option<SortOption>,
    /// 1-based page number
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_genre: None,
            sort: None,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    /// A default state with the given page size (at least 1)
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Default::default()
        }
    }
}

/// A change to the view inputs, as issued by a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SetSearch(String),
    SetGenre(Option<u32>),
    SetSort(Option<SortOption>),
    SetPage(usize),
}

impl ViewAction {
    /// Whether this action changes which podcasts are filtered or their order
    pub fn changes_filter(&self) -> bool {
        !matches!(self, ViewAction::SetPage(_))
    }
}

/// Apply an action to a view state
///
/// Filter and sort changes leave `current_page` untouched.
pub fn reduce(state: &ViewState, action: ViewAction) -> ViewState {
    let mut next = state.clone();
    match action {
        ViewAction::SetSearch(term) => next.search_term = term,
        ViewAction::SetGenre(genre) => next.selected_genre = genre,
        ViewAction::SetSort(sort) => next.sort = sort,
        ViewAction::SetPage(page) => next.current_page = page.max(1),
    }
    next
}

/// Case-insensitive substring match on the title; an empty term matches all
pub fn matches_search(podcast: &PodcastSummary, search_term: &str) -> bool {
    search_term.is_empty()
        || podcast
            .title
            .to_lowercase()
            .contains(&search_term.to_lowercase())
}

/// Genre membership; no selected genre matches all
pub fn matches_genre(podcast: &PodcastSummary, genre: Option<u32>) -> bool {
    genre.is_none_or(|id| podcast.has_genre(id))
}

/// The filtered and sorted view of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    /// Catalog indices of matching podcasts, in display order
    pub indices: Vec<usize>,
    /// Set when nothing matches
    pub no_results_message: Option<&'static str>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the indices against the catalog they were derived from
    pub fn podcasts<'a>(
        &'a self,
        catalog: &'a [PodcastSummary],
    ) -> impl Iterator<Item = &'a PodcastSummary> + 'a {
        self.indices.iter().filter_map(move |&i| catalog.get(i))
    }
}

/// Filter and sort the catalog for a view state
pub fn filter_and_sort(catalog: &[PodcastSummary], state: &ViewState) -> FilteredView {
    let mut indices: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_search(p, &state.search_term))
        .filter(|(_, p)| matches_genre(p, state.selected_genre))
        .map(|(i, _)| i)
        .collect();

    if let Some(sort) = state.sort {
        // sort_by is stable, equal keys keep catalog order
        indices.sort_by(|&a, &b| sort.compare(&catalog[a], &catalog[b]));
    }

    let no_results_message = indices.is_empty().then_some(NO_RESULTS_MESSAGE);

    FilteredView {
        indices,
        no_results_message,
    }
}

/// Index range of a page within a list of `len` items, clamped to bounds
///
/// Pages past the end yield an empty range.
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Number of pages needed for `len` items
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::api::RawPodcast;
    use crate::catalog::ingest_podcast;

    fn podcast(id: &str, title: &str, genres: &[u32], updated: &str) -> PodcastSummary {
        ingest_podcast(RawPodcast {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            image: String::new(),
            genres: genres.to_vec(),
            updated: updated.to_string(),
            seasons: 1,
        })
        .unwrap()
    }

    fn scenario_catalog() -> Vec<PodcastSummary> {
        vec![
            podcast("1", "Zebra Cast", &[1], "2023-01-01"),
            podcast("2", "Alpha Talk", &[2], "2023-06-01"),
        ]
    }

    fn larger_catalog() -> Vec<PodcastSummary> {
        vec![
            podcast("1", "The History Hour", &[3], "2022-05-01"),
            podcast("2", "history buffs", &[3, 5], "2023-02-01"),
            podcast("3", "Comedy Bang", &[4], "2023-02-01"),
            podcast("4", "Daily News", &[8], "2021-01-01"),
            podcast("5", "Kids Corner", &[9], "2023-02-01"),
            podcast("6", "Business Wars", &[6], "2020-07-15"),
            podcast("7", "Fiction Lab", &[7, 3], "2023-02-01"),
        ]
    }

    fn titles(catalog: &[PodcastSummary], view: &FilteredView) -> Vec<String> {
        view.podcasts(catalog).map(|p| p.title.clone()).collect()
    }

    fn state(sort: Option<SortOption>) -> ViewState {
        ViewState {
            sort,
            ..Default::default()
        }
    }

    #[test]
    fn title_asc_orders_alphabetically() {
        let catalog = scenario_catalog();
        let view = filter_and_sort(&catalog, &state(Some(SortOption::TitleAsc)));
        assert_eq!(titles(&catalog, &view), ["Alpha Talk", "Zebra Cast"]);
    }

    #[test]
    fn latest_orders_most_recent_first() {
        let catalog = scenario_catalog();
        let view = filter_and_sort(&catalog, &state(Some(SortOption::Latest)));
        assert_eq!(titles(&catalog, &view), ["Alpha Talk", "Zebra Cast"]);

        let view = filter_and_sort(&catalog, &state(Some(SortOption::Oldest)));
        assert_eq!(titles(&catalog, &view), ["Zebra Cast", "Alpha Talk"]);
    }

    #[test]
    fn title_desc_reverses_order() {
        let catalog = scenario_catalog();
        let view = filter_and_sort(&catalog, &state(Some(SortOption::TitleDesc)));
        assert_eq!(titles(&catalog, &view), ["Zebra Cast", "Alpha Talk"]);
    }

    #[test]
    fn title_sort_places_accented_titles_by_base_letter() {
        let catalog = vec![
            podcast("1", "Zebra Cast", &[1], "2023-01-01"),
            podcast("2", "Éclair Stories", &[1], "2023-01-01"),
            podcast("3", "Apple Hour", &[1], "2023-01-01"),
            podcast("4", "eclair stories", &[1], "2023-01-01"),
        ];

        let view = filter_and_sort(&catalog, &state(Some(SortOption::TitleAsc)));
        assert_eq!(
            titles(&catalog, &view),
            ["Apple Hour", "eclair stories", "Éclair Stories", "Zebra Cast"]
        );

        let view = filter_and_sort(&catalog, &state(Some(SortOption::TitleDesc)));
        assert_eq!(
            titles(&catalog, &view),
            ["Zebra Cast", "Éclair Stories", "eclair stories", "Apple Hour"]
        );
    }

    #[test]
    fn unset_sort_keeps_catalog_order() {
        let catalog = larger_catalog();
        let view = filter_and_sort(&catalog, &ViewState::default());
        assert_eq!(view.indices, (0..catalog.len()).collect::<Vec<_>>());
        assert!(view.no_results_message.is_none());
    }

    #[test]
    fn genre_filter_selects_members() {
        let catalog = scenario_catalog();
        let view = filter_and_sort(
            &catalog,
            &ViewState {
                selected_genre: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(titles(&catalog, &view), ["Alpha Talk"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = larger_catalog();
        let view = filter_and_sort(
            &catalog,
            &ViewState {
                search_term: "HISTORY".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(titles(&catalog, &view), ["The History Hour", "history buffs"]);
    }

    #[test]
    fn search_filter_is_idempotent() {
        let catalog = larger_catalog();
        for term in ["", "history", "o", "NEWS", "zzz"] {
            let view_state = ViewState {
                search_term: term.to_string(),
                ..Default::default()
            };
            let once = filter_and_sort(&catalog, &view_state);
            let subset: Vec<PodcastSummary> = once.podcasts(&catalog).cloned().collect();
            let twice = filter_and_sort(&subset, &view_state);

            assert_eq!(twice.indices, (0..subset.len()).collect::<Vec<_>>());
            assert!(
                subset
                    .iter()
                    .all(|p| p.title.to_lowercase().contains(&term.to_lowercase()))
            );
        }
    }

    #[test]
    fn search_and_genre_combine() {
        let catalog = larger_catalog();
        let view = filter_and_sort(
            &catalog,
            &ViewState {
                search_term: "history".to_string(),
                selected_genre: Some(5),
                ..Default::default()
            },
        );
        assert_eq!(titles(&catalog, &view), ["history buffs"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let catalog = larger_catalog();
        let view = filter_and_sort(&catalog, &state(Some(SortOption::Latest)));
        // Four podcasts share 2023-02-01 and must keep catalog order
        assert_eq!(&view.indices[..4], &[1, 2, 4, 6]);

        let view = filter_and_sort(&catalog, &state(Some(SortOption::Oldest)));
        assert_eq!(&view.indices[3..], &[1, 2, 4, 6]);

        let duplicates = vec![
            podcast("a", "Same", &[1], "2023-01-01"),
            podcast("b", "same", &[1], "2023-01-01"),
            podcast("c", "Same", &[1], "2023-01-01"),
        ];
        let view = filter_and_sort(&duplicates, &state(Some(SortOption::TitleAsc)));
        assert_eq!(view.indices, [0, 2, 1]);
        let view = filter_and_sort(&duplicates, &state(Some(SortOption::TitleDesc)));
        assert_eq!(view.indices, [1, 0, 2]);
    }

    #[test]
    fn empty_result_sets_no_results_message() {
        let catalog = scenario_catalog();
        let view = filter_and_sort(
            &catalog,
            &ViewState {
                search_term: "nothing like this".to_string(),
                ..Default::default()
            },
        );
        assert!(view.is_empty());
        assert_eq!(view.no_results_message, Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn pages_reconstruct_filtered_set() {
        for len in 0..30 {
            for page_size in 1..8 {
                let pages = page_count(len, page_size);
                let mut seen = Vec::new();
                for page in 1..=pages {
                    let range = page_range(len, page, page_size);
                    if page == pages {
                        let expected = if len % page_size == 0 {
                            page_size
                        } else {
                            len % page_size
                        };
                        assert_eq!(range.len(), expected);
                    }
                    seen.extend(range);
                }
                assert_eq!(seen, (0..len).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn page_range_clamps_out_of_range_pages() {
        assert_eq!(page_range(5, 3, 2), 4..5);
        assert_eq!(page_range(5, 4, 2), 5..5);
        assert_eq!(page_range(5, 100, 2), 5..5);
        assert_eq!(page_range(5, 0, 2), 0..2);
        assert_eq!(page_range(0, 1, 12), 0..0);
    }

    #[test]
    fn reduce_updates_single_field() {
        let initial = ViewState {
            current_page: 3,
            ..Default::default()
        };

        let next = reduce(&initial, ViewAction::SetSearch("news".to_string()));
        assert_eq!(next.search_term, "news");
        assert_eq!(next.current_page, 3);

        let next = reduce(&next, ViewAction::SetGenre(Some(8)));
        assert_eq!(next.selected_genre, Some(8));

        let next = reduce(&next, ViewAction::SetSort(Some(SortOption::Oldest)));
        assert_eq!(next.sort, Some(SortOption::Oldest));
        assert_eq!(next.current_page, 3);

        let next = reduce(&next, ViewAction::SetPage(0));
        assert_eq!(next.current_page, 1);

        // The input is untouched
        assert_eq!(initial.search_term, "");
    }

    #[test]
    fn sort_option_parses_and_displays() {
        for option in SortOption::ALL {
            assert_eq!(option.to_string().parse::<SortOption>(), Ok(option));
        }
        assert_eq!("Title-Asc".parse::<SortOption>(), Ok(SortOption::TitleAsc));
        assert_eq!(
            "newest".parse::<SortOption>(),
            Err(ParseSortError("newest".to_string()))
        );
    }

    #[test]
    fn with_page_size_rejects_zero() {
        assert_eq!(ViewState::with_page_size(0).page_size, 1);
        assert_eq!(ViewState::with_page_size(5).page_size, 5);
    }
}
