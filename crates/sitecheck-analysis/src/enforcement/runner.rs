//! Aggregating assertion runner: one predicate over every applicable page.

use std::path::Path;
use std::sync::Arc;

use sitecheck_core::config::SitecheckConfig;
use sitecheck_core::constants::HOMEPAGE_PATH;
use sitecheck_core::errors::PipelineError;
use tracing::{debug, warn};

use super::results::{timed, CheckResult, Severity, ViolationSink};
use crate::exemptions::ExemptionRules;
use crate::parsers::{DocumentCache, HtmlDocument};
use crate::predicates::{CheckMode, Page, PageTarget, Predicate, PredicateInfo, RuleSet};
use crate::scanner::{Corpus, CorpusEntry};

/// Session state shared by every predicate evaluation: the corpus, its parse
/// cache, the exemption rules and the resolved rule parameters. All of it is
/// read-only once built.
pub struct AssertionRunner {
    corpus: Corpus,
    cache: DocumentCache,
    exemptions: ExemptionRules,
    rules: RuleSet,
    fail_on_advisory: bool,
}

impl AssertionRunner {
    pub fn new(corpus: Corpus, exemptions: ExemptionRules, rules: RuleSet) -> Self {
        let cache = DocumentCache::new(corpus.len() as u64);
        Self {
            corpus,
            cache,
            exemptions,
            rules,
            fail_on_advisory: false,
        }
    }

    /// Load the corpus under `project_root` and build a runner for it.
    pub fn from_config(project_root: &Path, config: &SitecheckConfig) -> Result<Self, PipelineError> {
        let corpus = Corpus::load(&config.corpus_root(project_root), &config.corpus)?;
        let exemptions = ExemptionRules::from_config(&config.corpus);
        let rules = RuleSet::from_config(config)?;
        Ok(Self::new(corpus, exemptions, rules)
            .with_fail_on_advisory(config.report.effective_fail_on_advisory()))
    }

    /// Report advisory violations as failures.
    pub fn with_fail_on_advisory(mut self, enabled: bool) -> Self {
        self.fail_on_advisory = enabled;
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    pub fn exemptions(&self) -> &ExemptionRules {
        &self.exemptions
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Documents a predicate applies to: in its target set and not exempt
    /// under any category it honors. Scan order.
    pub fn applicable(&self, info: &PredicateInfo) -> Vec<&CorpusEntry> {
        self.corpus
            .entries()
            .iter()
            .filter(|e| self.rules.targets(info.target, &e.rel_path))
            .filter(|e| !self.exemptions.is_exempt_any(&e.rel_path, info.exemptions))
            .collect()
    }

    /// Evaluate `predicate` across the corpus and aggregate every violation
    /// into one result.
    pub fn evaluate(&self, predicate: &dyn Predicate) -> CheckResult {
        timed(|| self.evaluate_inner(predicate))
    }

    fn evaluate_inner(&self, predicate: &dyn Predicate) -> CheckResult {
        let info = predicate.info();
        let entries = self.applicable(info);

        if entries.is_empty() {
            return match info.missing_target {
                Some(message) => {
                    let mut sink = ViolationSink::new(info.id, Severity::Error);
                    sink.push(missing_target_path(info.target), None, message);
                    CheckResult::fail(info.id, 0, sink.into_violations())
                }
                None => {
                    debug!(check = info.id, "no applicable documents");
                    CheckResult::skipped(
                        info.id,
                        "No applicable documents (none match the target or all are exempt)".to_string(),
                    )
                }
            };
        }

        let mut docs: Vec<Arc<HtmlDocument>> = Vec::with_capacity(entries.len());
        for entry in &entries {
            match self.cache.get_or_parse(entry) {
                Ok(doc) => docs.push(doc),
                Err(e) => return CheckResult::errored(info.id, e.to_string()),
            }
        }
        let pages: Vec<Page<'_>> = entries
            .iter()
            .zip(&docs)
            .map(|(entry, doc)| Page {
                path: &entry.rel_path,
                doc,
            })
            .collect();

        let findings = predicate.evaluate(&pages, &self.rules);
        debug!(
            check = info.id,
            documents = pages.len(),
            findings = findings.len(),
            "evaluated predicate"
        );

        if findings.is_empty() {
            return CheckResult::pass(
                info.id,
                pages.len(),
                format!("{} document(s) checked, no violations", pages.len()),
            );
        }

        let severity = match info.mode {
            CheckMode::Enforced => Severity::Error,
            CheckMode::Advisory => Severity::Warning,
        };
        let mut sink = ViolationSink::new(info.id, severity);
        for f in findings {
            sink.push(f.file, f.line, f.message);
        }
        let violations = sink.into_violations();

        match info.mode {
            CheckMode::Enforced => CheckResult::fail(info.id, pages.len(), violations),
            CheckMode::Advisory => {
                for v in &violations {
                    warn!(check = info.id, location = %v.location(), "{}", v.message);
                }
                if self.fail_on_advisory {
                    CheckResult::fail(info.id, pages.len(), violations)
                } else {
                    CheckResult::warn(info.id, pages.len(), violations)
                }
            }
        }
    }
}

fn missing_target_path(target: PageTarget) -> &'static str {
    match target {
        PageTarget::Homepage => HOMEPAGE_PATH,
        PageTarget::AllPages | PageTarget::BlogPosts => ".",
    }
}
