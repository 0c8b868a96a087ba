//! Generic table-row predicate: metadata plus a single-page check function.

use super::traits::Predicate;
use super::types::{Defect, Finding, Page, PredicateInfo, RuleSet};

/// Signature of a single-page check.
pub type PageCheck = fn(&Page<'_>, &RuleSet) -> Vec<Defect>;

/// A predicate that applies `check` to each page independently.
pub struct PagePredicate {
    info: PredicateInfo,
    check: PageCheck,
}

impl PagePredicate {
    pub fn new(info: PredicateInfo, check: PageCheck) -> Self {
        Self { info, check }
    }
}

impl Predicate for PagePredicate {
    fn info(&self) -> &PredicateInfo {
        &self.info
    }

    fn evaluate(&self, pages: &[Page<'_>], rules: &RuleSet) -> Vec<Finding> {
        pages
            .iter()
            .flat_map(|page| {
                (self.check)(page, rules)
                    .into_iter()
                    .map(move |d| Finding {
                        file: page.path.to_string(),
                        line: d.line,
                        message: d.message,
                    })
            })
            .collect()
    }
}
