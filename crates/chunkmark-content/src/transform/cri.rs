//! Attaching CRI question/answer pairs to sections.

use std::collections::BTreeSet;

use crate::context::ProcessingContext;
use crate::tree::{Element, Node, Root};

/// Tag of the element carrying a question/answer pair.
pub const QUESTION_TAG: &str = "i-question";

/// Outcome of a join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    /// Sections that received a question.
    pub attached: usize,
    /// Table slugs that matched no section, sorted.
    pub unmatched: Vec<String>,
}

/// Append an `i-question` element to every section whose
/// `aria-labelledby` slug is in the context's table.
///
/// Without a table the tree is left untouched. Sections sharing a slug each
/// get their own element.
pub fn attach_questions(root: &mut Root, ctx: &ProcessingContext) -> JoinReport {
    let Some(table) = ctx.cri.as_ref() else {
        return JoinReport::default();
    };

    let mut report = JoinReport::default();
    let mut matched = BTreeSet::new();

    root.visit_elements_mut(&mut |el: &mut Element| {
        if el.tag != "section" {
            return;
        }
        let Some(slug) = el.property("ariaLabelledby") else {
            return;
        };
        let Some(qa) = table.get(slug) else {
            return;
        };
        matched.insert(slug.to_string());

        let question = Element::new(QUESTION_TAG)
            .with_property("question", qa.question.as_str())
            .with_property("answer", qa.answer.as_str());
        el.children.push(question.into());
        el.children.push(Node::text("\n\n"));
        report.attached += 1;
    });

    report.unmatched = table
        .slugs()
        .into_iter()
        .filter(|slug| !matched.contains(*slug))
        .map(str::to_string)
        .collect();

    if !report.unmatched.is_empty() {
        log::warn!(
            "{}: frontmatter slug(s) matched no section: {}",
            ctx.display_name(),
            report.unmatched.join(", ")
        );
    }
    log::debug!("Attached {} question(s)", report.attached);
    report
}
