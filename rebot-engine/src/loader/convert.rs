// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of deserialized result files into the result tree, and back.

use crate::{
    errors::{LoadError, MalformedReason},
    model::{
        ExecutionErrors, ExecutionResult, Keyword, Message, Tags, TestCase, TestSuite, Times,
        format_timestamp, parse_timestamp,
    },
};
use chrono::NaiveDateTime;
use rebot_metadata::{
    KeywordSummary, MessageSummary, RESULT_FORMAT_VERSION, ResultSummary, SuiteSummary,
    TestSummary,
};

/// Converts a deserialized result file into a result tree, validating it along the way.
pub(crate) fn result_from_summary(
    source_name: &str,
    summary: ResultSummary,
) -> Result<ExecutionResult, LoadError> {
    if summary.format_version != RESULT_FORMAT_VERSION {
        return Err(LoadError::UnsupportedFormatVersion {
            source_name: source_name.to_owned(),
            found: summary.format_version,
            supported: RESULT_FORMAT_VERSION,
        });
    }

    let cx = ConvertContext { source_name };
    let suite = cx.suite(summary.suite, None)?;
    let messages = summary
        .errors
        .into_iter()
        .map(|message| cx.message(message, "errors"))
        .collect::<Result<Vec<_>, _>>()?;

    let mut result = ExecutionResult::new(suite, ExecutionErrors { messages });
    result.generator = summary.generator;
    Ok(result)
}

struct ConvertContext<'a> {
    source_name: &'a str,
}

impl ConvertContext<'_> {
    fn malformed(&self, node: &str, reason: MalformedReason) -> LoadError {
        LoadError::Malformed {
            source_name: self.source_name.to_owned(),
            node: node.to_owned(),
            reason,
        }
    }

    fn suite(&self, summary: SuiteSummary, parent: Option<&str>) -> Result<TestSuite, LoadError> {
        let long_name = TestSuite::long_name(parent, &summary.name);
        let times = self.times(&long_name, summary.start_time, summary.end_time)?;
        let setup = summary
            .setup
            .map(|setup| self.keyword(setup, &long_name))
            .transpose()?;
        let teardown = summary
            .teardown
            .map(|teardown| self.keyword(teardown, &long_name))
            .transpose()?;
        let suites = summary
            .suites
            .into_iter()
            .map(|child| self.suite(child, Some(&long_name)))
            .collect::<Result<Vec<_>, _>>()?;
        let tests = summary
            .tests
            .into_iter()
            .map(|test| self.test(test, &long_name))
            .collect::<Result<Vec<_>, _>>()?;

        // The status in the summary is informational, and is always recomputed.
        Ok(TestSuite {
            name: summary.name,
            doc: summary.doc,
            metadata: summary.metadata,
            source: summary.source,
            message: summary.message,
            times,
            setup,
            teardown,
            suites,
            tests,
        })
    }

    fn test(&self, summary: TestSummary, parent: &str) -> Result<TestCase, LoadError> {
        let long_name = TestSuite::long_name(Some(parent), &summary.name);
        let times = self.times(&long_name, summary.start_time, summary.end_time)?;
        let keywords = summary
            .keywords
            .into_iter()
            .map(|keyword| self.keyword(keyword, &long_name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TestCase {
            name: summary.name,
            doc: summary.doc,
            tags: Tags::new(summary.tags),
            status: summary.status,
            critical: summary.critical,
            message: summary.message,
            timeout: summary.timeout,
            times,
            keywords,
        })
    }

    fn keyword(&self, summary: KeywordSummary, parent: &str) -> Result<Keyword, LoadError> {
        let long_name = TestSuite::long_name(Some(parent), &summary.name);
        let times = self.times(&long_name, summary.start_time, summary.end_time)?;
        let messages = summary
            .messages
            .into_iter()
            .map(|message| self.message(message, &long_name))
            .collect::<Result<Vec<_>, _>>()?;
        let keywords = summary
            .keywords
            .into_iter()
            .map(|keyword| self.keyword(keyword, &long_name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Keyword {
            name: summary.name,
            kind: summary.kind,
            args: summary.args,
            doc: summary.doc,
            status: summary.status,
            times,
            messages,
            keywords,
        })
    }

    fn message(&self, summary: MessageSummary, node: &str) -> Result<Message, LoadError> {
        let timestamp = summary
            .timestamp
            .map(|timestamp| self.timestamp(node, "timestamp", timestamp))
            .transpose()?;
        Ok(Message {
            level: summary.level,
            text: summary.text,
            timestamp,
            html: summary.html,
        })
    }

    fn times(
        &self,
        node: &str,
        start: Option<String>,
        end: Option<String>,
    ) -> Result<Option<Times>, LoadError> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => {
                let start_time = self.timestamp(node, "start time", start.clone())?;
                let end_time = self.timestamp(node, "end time", end.clone())?;
                Times::new(start_time, end_time)
                    .map(Some)
                    .ok_or_else(|| self.malformed(node, MalformedReason::EndBeforeStart { start, end }))
            }
            _ => Err(self.malformed(node, MalformedReason::PartialTimes)),
        }
    }

    fn timestamp(
        &self,
        node: &str,
        field: &'static str,
        input: String,
    ) -> Result<NaiveDateTime, LoadError> {
        parse_timestamp(&input)
            .ok_or_else(|| self.malformed(node, MalformedReason::InvalidTimestamp { field, input }))
    }
}

/// Converts a result tree back into its serializable form.
pub(crate) fn summary_from_result(result: &ExecutionResult) -> ResultSummary {
    let mut summary = ResultSummary::new(suite_summary(&result.suite));
    summary.generator = result.generator.clone();
    summary.errors = result.errors.messages.iter().map(message_summary).collect();
    summary
}

fn suite_summary(suite: &TestSuite) -> SuiteSummary {
    let (start_time, end_time) = times_summary(suite.times);
    SuiteSummary {
        name: suite.name.clone(),
        doc: suite.doc.clone(),
        metadata: suite.metadata.clone(),
        source: suite.source.clone(),
        status: Some(suite.status()),
        message: suite.message.clone(),
        start_time,
        end_time,
        setup: suite.setup.as_ref().map(keyword_summary),
        teardown: suite.teardown.as_ref().map(keyword_summary),
        suites: suite.suites.iter().map(suite_summary).collect(),
        tests: suite.tests.iter().map(test_summary).collect(),
    }
}

fn test_summary(test: &TestCase) -> TestSummary {
    let (start_time, end_time) = times_summary(test.times);
    TestSummary {
        name: test.name.clone(),
        doc: test.doc.clone(),
        tags: test.tags.iter().map(|tag| tag.name().into()).collect(),
        status: test.status,
        critical: test.critical,
        message: test.message.clone(),
        timeout: test.timeout.clone(),
        start_time,
        end_time,
        keywords: test.keywords.iter().map(keyword_summary).collect(),
    }
}

fn keyword_summary(keyword: &Keyword) -> KeywordSummary {
    let (start_time, end_time) = times_summary(keyword.times);
    KeywordSummary {
        name: keyword.name.clone(),
        kind: keyword.kind,
        args: keyword.args.clone(),
        doc: keyword.doc.clone(),
        status: keyword.status,
        start_time,
        end_time,
        messages: keyword.messages.iter().map(message_summary).collect(),
        keywords: keyword.keywords.iter().map(keyword_summary).collect(),
    }
}

fn message_summary(message: &Message) -> MessageSummary {
    MessageSummary {
        level: message.level,
        text: message.text.clone(),
        timestamp: message.timestamp.map(format_timestamp),
        html: message.html,
    }
}

fn times_summary(times: Option<Times>) -> (Option<String>, Option<String>) {
    match times {
        Some(times) => (
            Some(format_timestamp(times.start())),
            Some(format_timestamp(times.end())),
        ),
        None => (None, None),
    }
}
