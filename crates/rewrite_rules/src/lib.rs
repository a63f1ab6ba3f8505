// crates/rewrite_rules/src/lib.rs

//! Whole-document rewrites driven by regex patterns and templates.
//!
//! A `TransformRule` pairs a pattern with a template closure. The template
//! receives the match's captured groups plus a context name resolved by an
//! optional `ContextProbe`, and returns the literal substitution text.
//! Matches are replaced independently; rule authors are responsible for
//! keeping patterns non-overlapping. A pattern that matches nowhere is a
//! no-op, never an error.

use regex::{Captures, Regex};

/// Resolves which of several candidate identifier names is in play near a
/// match.
///
/// The probe inspects a bounded span: the matched text itself, widened to
/// the start of the match's line plus `lookbehind_lines` complete lines
/// above it when a lookbehind is configured. The first candidate present
/// in the span wins, in listed priority order; if none are present the
/// designated fallback is used.
#[derive(Debug, Clone)]
pub struct ContextProbe {
    candidates: Vec<String>,
    fallback: String,
    lookbehind_lines: usize,
}

impl ContextProbe {
    pub fn new<I, S>(candidates: I, fallback: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            fallback: fallback.to_string(),
            lookbehind_lines: 0,
        }
    }

    /// Widens the probe span to the match's own line plus `lines` complete
    /// lines above it.
    pub fn with_lookbehind(mut self, lines: usize) -> Self {
        self.lookbehind_lines = lines;
        self
    }

    /// First candidate present in `span`, in priority order, or the
    /// fallback.
    pub fn resolve<'a>(&'a self, span: &str) -> &'a str {
        self.candidates
            .iter()
            .find(|candidate| span.contains(candidate.as_str()))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    fn resolve_for_match<'a>(&'a self, text: &str, start: usize, end: usize) -> &'a str {
        let begin = if self.lookbehind_lines == 0 {
            start
        } else {
            span_begin(text, start, self.lookbehind_lines)
        };
        self.resolve(&text[begin..end])
    }
}

/// Byte offset of the start of the line `lookbehind_lines` lines above the
/// line containing `position`.
fn span_begin(text: &str, position: usize, lookbehind_lines: usize) -> usize {
    let mut begin = text[..position].rfind('\n').map_or(0, |i| i + 1);
    for _ in 0..lookbehind_lines {
        if begin == 0 {
            break;
        }
        begin = text[..begin - 1].rfind('\n').map_or(0, |i| i + 1);
    }
    begin
}

/// Template invoked per match: captured groups plus the resolved context
/// name (empty when the rule has no probe).
pub type Template = Box<dyn Fn(&Captures, &str) -> String>;

/// A pattern plus a template, optionally conditioned on a `ContextProbe`.
pub struct TransformRule {
    name: String,
    pattern: Regex,
    probe: Option<ContextProbe>,
    template: Template,
}

impl TransformRule {
    /// Compiles `pattern` and pairs it with `template`.
    pub fn new(
        name: &str,
        pattern: &str,
        template: impl Fn(&Captures, &str) -> String + 'static,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.to_string(),
            pattern: Regex::new(pattern)?,
            probe: None,
            template: Box::new(template),
        })
    }

    /// A rule whose template is the empty string; the form used by the
    /// removal pipeline.
    pub fn removal(name: &str, pattern: &str) -> Result<Self, regex::Error> {
        Self::new(name, pattern, |_, _| String::new())
    }

    pub fn with_probe(mut self, probe: ContextProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rewrites every match of the rule's pattern in `text`.
    pub fn apply(&self, text: &str) -> String {
        let mut matched = 0usize;
        let result = self
            .pattern
            .replace_all(text, |caps: &Captures| {
                matched += 1;
                let context = match (&self.probe, caps.get(0)) {
                    (Some(probe), Some(whole)) => probe
                        .resolve_for_match(text, whole.start(), whole.end())
                        .to_string(),
                    _ => String::new(),
                };
                (self.template)(caps, &context)
            })
            .into_owned();
        log::debug!("rule '{}' rewrote {} match(es)", self.name, matched);
        result
    }
}

/// Applies a single rule; present for symmetry with `apply_rules`.
pub fn apply_rule(text: &str, rule: &TransformRule) -> String {
    rule.apply(text)
}

/// Applies each rule to the result of the previous one, in order.
pub fn apply_rules(text: &str, rules: &[TransformRule]) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rule_rewrites_every_match() {
        let rule = TransformRule::new("upcase marker", r"refund\((\w+)\)", |caps, _| {
            format!("propose({})", &caps[1])
        })
        .unwrap();
        let out = rule.apply("refund(p1);\nrefund(p2);\n");
        assert_eq!(out, "propose(p1);\npropose(p2);\n");
    }

    #[test]
    fn test_no_match_is_a_no_op() {
        let rule = TransformRule::new("noop", r"never matches \d{9}z", |_, _| String::new()).unwrap();
        let input = "unchanged\n";
        assert_eq!(rule.apply(input), input);
    }

    #[test]
    fn test_removal_rule_substitutes_empty_string() {
        let rule = TransformRule::removal("drop calls", r"(?m)^drop\(\);\n").unwrap();
        assert_eq!(rule.apply("keep();\ndrop();\nkeep();\n"), "keep();\nkeep();\n");
    }

    #[test]
    fn test_probe_first_candidate_wins_in_priority_order() {
        let probe = ContextProbe::new(["reloadedMatch", "updatedMatch", "freshMatch"], "match");
        // Both names appear; the listed order decides, not position in text.
        assert_eq!(probe.resolve("updatedMatch then reloadedMatch"), "reloadedMatch");
        assert_eq!(probe.resolve("only updatedMatch here"), "updatedMatch");
    }

    #[test]
    fn test_probe_falls_back_when_no_candidate_present() {
        let probe = ContextProbe::new(["reloadedMatch", "updatedMatch"], "match");
        assert_eq!(probe.resolve("nothing relevant"), "match");
    }

    #[test]
    fn test_template_sees_resolved_context_from_match_span() {
        let probe = ContextProbe::new(["updatedMatch", "freshMatch"], "match");
        let rule = TransformRule::new(
            "wrap payout",
            r"payout\((\w+)\);",
            |caps, ctx| format!("guard({ctx}); payout({});", &caps[1]),
        )
        .unwrap()
        .with_probe(probe);

        let out = rule.apply("save(updatedMatch); payout(vault);\n");
        // The probe span is the matched text only, which does not include
        // `updatedMatch`, so the fallback applies.
        assert_eq!(out, "save(updatedMatch); guard(match); payout(vault);\n");
    }

    #[test]
    fn test_lookbehind_widens_probe_span_to_prior_lines() {
        let probe =
            ContextProbe::new(["updatedMatch", "freshMatch"], "match").with_lookbehind(2);
        let rule = TransformRule::new(
            "wrap payout",
            r"payout\(\);",
            |_, ctx| format!("payout({ctx});"),
        )
        .unwrap()
        .with_probe(probe);

        let out = rule.apply("save(updatedMatch);\nlog();\npayout();\n");
        assert_eq!(out, "save(updatedMatch);\nlog();\npayout(updatedMatch);\n");
    }

    #[test]
    fn test_lookbehind_does_not_reach_past_its_window() {
        let probe =
            ContextProbe::new(["updatedMatch"], "match").with_lookbehind(1);
        let rule = TransformRule::new("wrap", r"payout\(\);", |_, ctx| format!("payout({ctx});"))
            .unwrap()
            .with_probe(probe);

        // `updatedMatch` sits two lines above the match, outside the
        // one-line lookbehind.
        let out = rule.apply("save(updatedMatch);\nlog();\npayout();\n");
        assert_eq!(out, "save(updatedMatch);\nlog();\npayout(match);\n");
    }

    #[test]
    fn test_apply_rules_composes_sequentially() {
        let first = TransformRule::new("a to b", r"a", |_, _| "b".to_string()).unwrap();
        let second = TransformRule::new("b to c", r"b", |_, _| "c".to_string()).unwrap();
        // The second rule sees the first rule's output.
        assert_eq!(apply_rules("a", &[first, second]), "c");
    }

    #[test]
    fn test_apply_rule_matches_method() {
        let rule = TransformRule::removal("strip x", r"x").unwrap();
        assert_eq!(apply_rule("axbx", &rule), rule.apply("axbx"));
    }

    #[test]
    fn test_span_begin_walks_whole_lines() {
        let text = "one\ntwo\nthree MATCH";
        let match_start = text.find("MATCH").unwrap();
        assert_eq!(span_begin(text, match_start, 0), 8); // start of "three"
        assert_eq!(span_begin(text, match_start, 1), 4); // start of "two"
        assert_eq!(span_begin(text, match_start, 5), 0); // clamped at text start
    }
}
