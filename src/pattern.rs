//! Dependency pattern templates and matching
//!
//! A template describes a chain of lexical items connected by dependency
//! relations: an anchor token (the dependent), its governor, and for
//! three-node templates a second-level governor. Matching walks the flat
//! token sequence of one item as an implicit dependency graph: a token's
//! `gov_lemma` is resolved against the *forms* of the other tokens in the
//! same sequence. The join is fuzzy: when several tokens share the
//! referenced surface form, every candidate yields its own pattern
//! instance.

use crate::corpus::{Item, Token};
use rustc_hash::FxHashMap;

/// One concrete match of a template within an item.
///
/// `rel2`, `gov2_lemma` and `gov2_pos` are empty strings for two-node
/// templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternInstance {
    pub dep_lemma: String,
    pub dep_pos: String,
    pub gov1_lemma: String,
    pub gov1_pos: String,
    pub rel1: String,
    pub gov2_lemma: String,
    pub gov2_pos: String,
    pub rel2: String,
}

impl PatternInstance {
    fn simple(dep: &Token, gov: &Token, rel: &str) -> Self {
        Self {
            dep_lemma: dep.lemma.clone(),
            dep_pos: dep.pos.clone(),
            gov1_lemma: gov.lemma.clone(),
            gov1_pos: gov.pos.clone(),
            rel1: rel.to_string(),
            gov2_lemma: String::new(),
            gov2_pos: String::new(),
            rel2: String::new(),
        }
    }

    fn chained(dep: &Token, gov1: &Token, gov2: &Token, rel1: &str, rel2: &str) -> Self {
        Self {
            dep_lemma: dep.lemma.clone(),
            dep_pos: dep.pos.clone(),
            gov1_lemma: gov1.lemma.clone(),
            gov1_pos: gov1.pos.clone(),
            rel1: rel1.to_string(),
            gov2_lemma: gov2.lemma.clone(),
            gov2_pos: gov2.pos.clone(),
            rel2: rel2.to_string(),
        }
    }

    /// True when the instance came from a two-node template
    pub fn is_simple(&self) -> bool {
        self.rel2.is_empty()
    }

    /// Fixed-order comparable key: two instances describe the same pattern
    /// iff their canonical strings are equal.
    pub fn canonical(&self) -> String {
        [
            self.dep_pos.as_str(),
            self.dep_lemma.as_str(),
            self.rel1.as_str(),
            self.gov1_pos.as_str(),
            self.gov1_lemma.as_str(),
            self.rel2.as_str(),
            self.gov2_pos.as_str(),
            self.gov2_lemma.as_str(),
        ]
        .join(", ")
    }
}

/// Second hop of a three-node template
#[derive(Debug, Clone, Copy)]
pub struct Hop {
    /// Relation the first governor must itself carry
    pub gov_rel: &'static str,
    /// POS of the second-level governor
    pub gov2_pos: &'static str,
}

/// Declarative template descriptor driving the matcher
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    /// Anchor condition on the dependent token
    pub dep_pos: &'static str,
    pub dep_rel: &'static str,
    /// POS required of the governor candidates
    pub gov_pos: &'static str,
    /// Present for three-node templates
    pub chain: Option<Hop>,
}

/// The five built-in templates
pub const TEMPLATES: &[Template] = &[
    Template {
        name: "subject",
        dep_pos: "NOUN",
        dep_rel: "nsubj",
        gov_pos: "VERB",
        chain: None,
    },
    Template {
        name: "nominal-modifier",
        dep_pos: "NOUN",
        dep_rel: "nmod",
        gov_pos: "NOUN",
        chain: None,
    },
    Template {
        name: "object",
        dep_pos: "NOUN",
        dep_rel: "obj",
        gov_pos: "VERB",
        chain: None,
    },
    Template {
        name: "marked-subordinate",
        dep_pos: "ADP",
        dep_rel: "mark",
        gov_pos: "VERB",
        chain: Some(Hop { gov_rel: "xcomp", gov2_pos: "VERB" }),
    },
    Template {
        name: "coordination",
        dep_pos: "CCONJ",
        dep_rel: "cc",
        gov_pos: "NOUN",
        chain: Some(Hop { gov_rel: "conj", gov2_pos: "NOUN" }),
    },
];

/// Per-item index from surface form to token positions.
///
/// Built once per item and shared by every template. Positions stay in
/// sentence order, so candidate enumeration matches a left-to-right scan.
pub struct FormIndex<'a> {
    by_form: FxHashMap<&'a str, Vec<usize>>,
}

impl<'a> FormIndex<'a> {
    pub fn build(tokens: &'a [Token]) -> Self {
        let mut by_form: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        for (i, token) in tokens.iter().enumerate() {
            by_form.entry(token.form.as_str()).or_default().push(i);
        }
        Self { by_form }
    }

    /// Positions of every token whose form equals `form`
    pub fn positions(&self, form: &str) -> &[usize] {
        self.by_form.get(form).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Template {
    /// Match this template against one item's token sequence.
    ///
    /// Pure and read-only; templates can run in any order. An empty
    /// sequence yields no instances.
    pub fn matches(&self, tokens: &[Token], index: &FormIndex<'_>) -> Vec<PatternInstance> {
        let mut instances = Vec::new();

        for dep in tokens {
            if dep.pos != self.dep_pos || dep.deprel != self.dep_rel {
                continue;
            }
            for &g1 in index.positions(&dep.gov_lemma) {
                let gov1 = &tokens[g1];
                if gov1.pos != self.gov_pos {
                    continue;
                }
                match self.chain {
                    None => instances.push(PatternInstance::simple(dep, gov1, self.dep_rel)),
                    Some(hop) => {
                        if gov1.deprel != hop.gov_rel {
                            continue;
                        }
                        for &g2 in index.positions(&gov1.gov_lemma) {
                            let gov2 = &tokens[g2];
                            if gov2.pos == hop.gov2_pos {
                                instances.push(PatternInstance::chained(
                                    dep,
                                    gov1,
                                    gov2,
                                    self.dep_rel,
                                    hop.gov_rel,
                                ));
                            }
                        }
                    }
                }
            }
        }

        instances
    }

    /// Convenience wrapper building the form index for a single item
    pub fn match_item(&self, item: &Item) -> Vec<PatternInstance> {
        let index = FormIndex::build(&item.analysis);
        self.matches(&item.analysis, &index)
    }
}

/// Look up a built-in template by name
pub fn template(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name == name)
}
