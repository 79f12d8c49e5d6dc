// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    config::{MessageThreshold, RemoveKeywordsMode},
    model::{Keyword, TestSuite},
};
use rebot_filtering::normalize;
use rebot_metadata::{KeywordKind, LogLevel};
use tracing::debug;

const CONTENT_REMOVED: &str = "_Keyword data removed using the --remove-keywords option._";

pub(super) fn remove_keywords(suite: &mut TestSuite, mode: RemoveKeywordsMode) {
    debug!(suite = %suite.name, %mode, "removing keywords");
    match mode {
        RemoveKeywordsMode::All => remove_all(suite),
        RemoveKeywordsMode::Passed => remove_passed(suite),
        RemoveKeywordsMode::For => for_each_keyword(suite, &mut remove_for_iterations),
        RemoveKeywordsMode::Wuks => for_each_keyword(suite, &mut remove_wuks_attempts),
    }
}

pub(super) fn remove_messages(suite: &mut TestSuite, threshold: MessageThreshold) {
    for_each_keyword(suite, &mut |keyword| {
        keyword
            .messages
            .retain(|message| threshold.keeps(message.level));
    });
}

fn remove_all(suite: &mut TestSuite) {
    for keyword in suite.setup.iter_mut().chain(suite.teardown.iter_mut()) {
        clear_content(keyword);
    }
    for test in &mut suite.tests {
        test.keywords.iter_mut().for_each(clear_content);
    }
    for child in &mut suite.suites {
        remove_all(child);
    }
}

fn remove_passed(suite: &mut TestSuite) {
    if !suite.all_tests().iter().any(|test| test.failed()) {
        for keyword in suite.setup.iter_mut().chain(suite.teardown.iter_mut()) {
            if !contains_warning(keyword) {
                clear_content(keyword);
            }
        }
    }
    for test in &mut suite.tests {
        if test.passed() {
            for keyword in &mut test.keywords {
                if !contains_warning(keyword) {
                    clear_content(keyword);
                }
            }
        }
    }
    for child in &mut suite.suites {
        remove_passed(child);
    }
}

/// Removes the children and messages of `keyword`, keeping the keyword itself.
fn clear_content(keyword: &mut Keyword) {
    if keyword.keywords.is_empty() && keyword.messages.is_empty() {
        return;
    }
    keyword.keywords.clear();
    keyword.messages.clear();
    append_doc(keyword, CONTENT_REMOVED);
}

fn remove_for_iterations(keyword: &mut Keyword) {
    if keyword.kind != KeywordKind::For {
        return;
    }
    let removed = remove_all_but_last(&mut keyword.keywords, |iteration| {
        iteration.kind == KeywordKind::ForIteration && iteration.passed()
    });
    annotate_removed(keyword, removed, "passing");
}

fn remove_wuks_attempts(keyword: &mut Keyword) {
    if !is_wait_until_keyword_succeeds(keyword) {
        return;
    }
    let removed = remove_all_but_last(&mut keyword.keywords, |attempt| !attempt.passed());
    annotate_removed(keyword, removed, "failing");
}

fn is_wait_until_keyword_succeeds(keyword: &Keyword) -> bool {
    matches!(
        normalize(&keyword.name).as_str(),
        "waituntilkeywordsucceeds" | "builtin.waituntilkeywordsucceeds"
    )
}

/// Removes children matching `removable`, except the last such child and any child containing
/// warnings. Returns the number of children removed.
fn remove_all_but_last(children: &mut Vec<Keyword>, removable: impl Fn(&Keyword) -> bool) -> usize {
    let Some(last) = children.iter().rposition(&removable) else {
        return 0;
    };

    let before = children.len();
    let mut index = 0;
    children.retain(|child| {
        let keep = index == last || !removable(child) || contains_warning(child);
        index += 1;
        keep
    });
    before - children.len()
}

fn annotate_removed(keyword: &mut Keyword, removed: usize, kind: &str) {
    if removed == 0 {
        return;
    }
    let items = if removed == 1 { "item" } else { "items" };
    debug!(keyword = %keyword.name, removed, "removed {kind} {items}");
    append_doc(
        keyword,
        &format!("_{removed} {kind} {items} removed using the --remove-keywords option._"),
    );
}

fn append_doc(keyword: &mut Keyword, note: &str) {
    if keyword.doc.is_empty() {
        keyword.doc = note.to_owned();
    } else {
        keyword.doc = format!("{}\n\n{note}", keyword.doc);
    }
}

fn contains_warning(keyword: &Keyword) -> bool {
    keyword
        .messages
        .iter()
        .any(|message| message.level >= LogLevel::Warn && message.level != LogLevel::Fail)
        || keyword.keywords.iter().any(contains_warning)
}

/// Calls `f` on every keyword in the tree, parents before children.
fn for_each_keyword(suite: &mut TestSuite, f: &mut dyn FnMut(&mut Keyword)) {
    fn walk(keyword: &mut Keyword, f: &mut dyn FnMut(&mut Keyword)) {
        f(keyword);
        for child in &mut keyword.keywords {
            walk(child, f);
        }
    }

    for keyword in suite.setup.iter_mut().chain(suite.teardown.iter_mut()) {
        walk(keyword, f);
    }
    for test in &mut suite.tests {
        for keyword in &mut test.keywords {
            walk(keyword, f);
        }
    }
    for child in &mut suite.suites {
        for_each_keyword(child, f);
    }
}
