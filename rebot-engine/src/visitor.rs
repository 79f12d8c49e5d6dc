// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Traversal of the result tree.
//!
//! Consumers implement [`ResultVisitor`] and pass it to [`walk_result`] or [`walk_suite`]. The
//! traversal is pre-order and depth-first, visiting children in stored order: a suite's setup,
//! then its child suites, then its tests, then its teardown; a keyword's child keywords, then
//! its messages.
//!
//! Every `start_*` callback returns a [`VisitFlow`]. Returning [`VisitFlow::SkipChildren`] skips
//! the node's children but not its siblings, and the matching `end_*` callback is still called.

use crate::model::{ExecutionResult, Keyword, Message, TestCase, TestSuite};
use rebot_metadata::TestStatus;

/// A node in the result tree.
#[derive(Clone, Copy, Debug)]
pub enum ResultNode<'a> {
    /// A suite.
    Suite(&'a TestSuite),

    /// A test.
    Test(&'a TestCase),

    /// A keyword.
    Keyword(&'a Keyword),
}

impl ResultNode<'_> {
    /// Returns the name of the node.
    pub fn name(&self) -> &str {
        match self {
            Self::Suite(suite) => &suite.name,
            Self::Test(test) => &test.name,
            Self::Keyword(keyword) => &keyword.name,
        }
    }

    /// Returns the status of the node.
    pub fn status(&self) -> TestStatus {
        match self {
            Self::Suite(suite) => suite.status(),
            Self::Test(test) => test.status,
            Self::Keyword(keyword) => keyword.status,
        }
    }
}

/// Whether to descend into a node's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitFlow {
    /// Visit the children.
    Continue,

    /// Skip the children, continuing with the node's next sibling.
    SkipChildren,
}

/// The position of a suite or test within the tree.
#[derive(Clone, Copy, Debug)]
pub struct NodeContext<'a> {
    /// The id of the node, for example `s1-s2-t1`.
    pub id: &'a str,

    /// The dotted long name of the node, for example `Root.Child.Test 1`.
    pub long_name: &'a str,

    /// The depth of the node. The root suite has depth 0, and its tests depth 1.
    pub depth: usize,
}

/// A consumer of the result tree.
///
/// Every callback has a default implementation. The per-variant `start_*` and `end_*` callbacks
/// forward to [`start_node`](Self::start_node) and [`end_node`](Self::end_node), so visitors that
/// treat all nodes alike only need to implement those.
pub trait ResultVisitor {
    /// Called before visiting any node.
    fn start_node(&mut self, node: ResultNode<'_>) -> VisitFlow {
        let _ = node;
        VisitFlow::Continue
    }

    /// Called after visiting a node and its children.
    fn end_node(&mut self, node: ResultNode<'_>) {
        let _ = node;
    }

    /// Called before visiting a suite.
    fn start_suite(&mut self, suite: &TestSuite, cx: &NodeContext<'_>) -> VisitFlow {
        let _ = cx;
        self.start_node(ResultNode::Suite(suite))
    }

    /// Called after visiting a suite and its children.
    fn end_suite(&mut self, suite: &TestSuite, cx: &NodeContext<'_>) {
        let _ = cx;
        self.end_node(ResultNode::Suite(suite))
    }

    /// Called before visiting a test.
    fn start_test(&mut self, test: &TestCase, cx: &NodeContext<'_>) -> VisitFlow {
        let _ = cx;
        self.start_node(ResultNode::Test(test))
    }

    /// Called after visiting a test and its keywords.
    fn end_test(&mut self, test: &TestCase, cx: &NodeContext<'_>) {
        let _ = cx;
        self.end_node(ResultNode::Test(test))
    }

    /// Called before visiting a keyword.
    fn start_keyword(&mut self, keyword: &Keyword) -> VisitFlow {
        self.start_node(ResultNode::Keyword(keyword))
    }

    /// Called after visiting a keyword and its children.
    fn end_keyword(&mut self, keyword: &Keyword) {
        self.end_node(ResultNode::Keyword(keyword))
    }

    /// Called for each message logged by a keyword.
    fn visit_message(&mut self, message: &Message) {
        let _ = message;
    }

    /// Called for each execution error, after the suite tree has been visited.
    fn visit_error(&mut self, message: &Message) {
        let _ = message;
    }
}

/// Walks a complete result: the suite tree, followed by the execution errors.
pub fn walk_result<V: ResultVisitor + ?Sized>(result: &ExecutionResult, visitor: &mut V) {
    walk_suite(&result.suite, visitor);
    for message in &result.errors.messages {
        visitor.visit_error(message);
    }
}

/// Walks a suite tree, treating `suite` as the root.
pub fn walk_suite<V: ResultVisitor + ?Sized>(suite: &TestSuite, visitor: &mut V) {
    let id = TestSuite::child_suite_id(None, 0);
    walk_suite_impl(suite, &id, &suite.name, 0, visitor);
}

fn walk_suite_impl<V: ResultVisitor + ?Sized>(
    suite: &TestSuite,
    id: &str,
    long_name: &str,
    depth: usize,
    visitor: &mut V,
) {
    let cx = NodeContext {
        id,
        long_name,
        depth,
    };
    if visitor.start_suite(suite, &cx) == VisitFlow::Continue {
        if let Some(setup) = &suite.setup {
            walk_keyword(setup, visitor);
        }
        for (index, child) in suite.suites.iter().enumerate() {
            let child_id = TestSuite::child_suite_id(Some(id), index);
            let child_long_name = TestSuite::long_name(Some(long_name), &child.name);
            walk_suite_impl(child, &child_id, &child_long_name, depth + 1, visitor);
        }
        for (index, test) in suite.tests.iter().enumerate() {
            let test_id = TestSuite::child_test_id(id, index);
            let test_long_name = TestSuite::long_name(Some(long_name), &test.name);
            let test_cx = NodeContext {
                id: &test_id,
                long_name: &test_long_name,
                depth: depth + 1,
            };
            walk_test(test, &test_cx, visitor);
        }
        if let Some(teardown) = &suite.teardown {
            walk_keyword(teardown, visitor);
        }
    }
    visitor.end_suite(suite, &cx);
}

fn walk_test<V: ResultVisitor + ?Sized>(test: &TestCase, cx: &NodeContext<'_>, visitor: &mut V) {
    if visitor.start_test(test, cx) == VisitFlow::Continue {
        for keyword in &test.keywords {
            walk_keyword(keyword, visitor);
        }
    }
    visitor.end_test(test, cx);
}

fn walk_keyword<V: ResultVisitor + ?Sized>(keyword: &Keyword, visitor: &mut V) {
    if visitor.start_keyword(keyword) == VisitFlow::Continue {
        for child in &keyword.keywords {
            walk_keyword(child, visitor);
        }
        for message in &keyword.messages {
            visitor.visit_message(message);
        }
    }
    visitor.end_keyword(keyword);
}
