//! Splitting section lines into slide pages.

use std::num::NonZeroUsize;

/// Split `lines` into slide texts of at most `budget` lines each.
///
/// Lines are right-trimmed; blank lines count toward the budget and are
/// kept. Only the last page may be shorter than `budget`. Splitting every
/// page on `'\n'` and concatenating gives back the right-trimmed input.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use pro6doc::song::paginate;
///
/// let pages = paginate(&["a", "b  ", "", "c"], NonZeroUsize::new(2).unwrap());
/// assert_eq!(pages, ["a\nb", "\nc"]);
/// ```
pub fn paginate<S: AsRef<str>>(lines: &[S], budget: NonZeroUsize) -> Vec<String> {
    lines
        .chunks(budget.get())
        .map(|chunk| {
            chunk
                .iter()
                .map(|line| line.as_ref().trim_end())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

/// Label for page `index` (0-based) of a section split into `count` pages.
///
/// Sections that fit on one slide get no label.
///
/// # Examples
///
/// ```rust
/// use pro6doc::song::slide_label;
///
/// assert_eq!(slide_label("V1", 0, 2), "V1-1");
/// assert_eq!(slide_label("V1", 0, 1), "");
/// ```
pub fn slide_label(section: &str, index: usize, count: usize) -> String {
    if count > 1 {
        format!("{}-{}", section, index + 1)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_exact_fit() {
        let pages = paginate(&["Line A", "Line B"], budget(2));
        assert_eq!(pages, ["Line A\nLine B"]);
    }

    #[test]
    fn test_budget_one_labels() {
        let pages = paginate(&["Line A", "Line B"], budget(1));
        assert_eq!(pages, ["Line A", "Line B"]);
        let labels: Vec<_> = (0..pages.len()).map(|i| slide_label("V1", i, pages.len())).collect();
        assert_eq!(labels, ["V1-1", "V1-2"]);
    }

    #[test]
    fn test_trailing_partial_page() {
        let pages = paginate(&["1", "2", "3", "4", "5"], budget(4));
        assert_eq!(pages, ["1\n2\n3\n4", "5"]);
    }

    #[test]
    fn test_empty_section() {
        let lines: [&str; 0] = [];
        assert!(paginate(&lines, budget(4)).is_empty());
    }

    #[test]
    fn test_blank_lines_count() {
        let pages = paginate(&["Line C", ""], budget(2));
        assert_eq!(pages, ["Line C\n"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn line_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                Just(String::new()),
                "[a-zA-Z ,.'你好]{0,12}",
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn prop_round_trip(
                lines in prop::collection::vec(line_strategy(), 0..20),
                n in 1usize..8,
            ) {
                let pages = paginate(&lines, budget(n));
                let rejoined: Vec<String> = pages
                    .iter()
                    .flat_map(|page| page.split('\n').map(str::to_string))
                    .collect();
                let expected: Vec<String> = lines.iter().map(|l| l.trim_end().to_string()).collect();
                prop_assert_eq!(rejoined, expected);
            }

            #[test]
            fn prop_page_sizes(
                lines in prop::collection::vec(line_strategy(), 1..20),
                n in 1usize..8,
            ) {
                let pages = paginate(&lines, budget(n));
                let last = pages.len() - 1;
                for (i, page) in pages.iter().enumerate() {
                    let count = page.split('\n').count();
                    prop_assert!(count <= n);
                    if i < last {
                        prop_assert_eq!(count, n);
                    }
                }
            }
        }
    }
}
