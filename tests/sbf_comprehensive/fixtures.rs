//! Shared record fixtures.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sbf::{record, Text};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InnerEnum {
    #[default]
    Whatever1,
    Whatever2,
    Whatever3,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct InnerClass {
    pub whatever1: Text<InnerEnum>,
    pub whatever2: Text<InnerEnum>,
    pub whatever3: Text<InnerEnum>,
    pub funky_string: String,
    pub hello_world: String,
    pub funny_float: f32,
    pub funny_number: i32,
}

record! {
    InnerClass {
        whatever1 as "Whatever1",
        whatever2 as "Whatever2",
        whatever3 as "Whatever3",
        funky_string as "FunkyString",
        hello_world as "HelloWorld",
        funny_float as "FunnyFloat",
        funny_number as "FunnyNumber",
    }
}

/// Members with restricted write access that must still survive a round-trip
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateTest {
    pub current_time: Text<DateTime<Utc>>,
    pub time_span: Text<Duration>,
}

record! {
    PrivateTest {
        current_time as "CurrentTime" => [private, force_include],
        time_span as "TimeSpan" => [private, force_include],
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestClass {
    pub string_array: Vec<String>,
    pub funky_string: String,
    pub hello_world: String,
    pub private: PrivateTest,
    pub funny_float: f32,
    pub inner: InnerClass,
    pub funny_number: i32,
    pub funny_byte: u8,
}

record! {
    TestClass as "TestClass" {
        string_array as "StringArray",
        funky_string as "FunkyString",
        hello_world as "HelloWorld",
        private as "Private",
        funny_float as "FunnyFloat",
        inner as "Inner",
        funny_number as "FunnyNumber",
        funny_byte as "FunnyByte",
    }
}

impl TestClass {
    pub fn initialize() -> Self {
        TestClass {
            string_array: vec!["Example".to_string(), "Values".to_string()],
            funky_string: "ÜÜÜÜÜÜÜÜÜÜÜÜ".to_string(),
            hello_world: "Hello World!".to_string(),
            private: PrivateTest {
                current_time: Text(Utc::now()),
                time_span: Text(Duration::MAX),
            },
            funny_float: 69.42,
            inner: InnerClass {
                whatever1: Text(InnerEnum::Whatever1),
                whatever2: Text(InnerEnum::Whatever2),
                whatever3: Text(InnerEnum::Whatever3),
                funky_string: "ÜÜÜÜÜÜÜÜÜÜÜÜ".to_string(),
                hello_world: "Hello World!".to_string(),
                funny_float: 69.42,
                funny_number: 69420,
            },
            funny_number: 69420,
            funny_byte: 0x69,
        }
    }
}

/// Canonical text form used to compare records
pub fn canonical<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap()
}
