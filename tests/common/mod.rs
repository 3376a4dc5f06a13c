#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use log::kv::{self, Key, Value, VisitSource};
use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

struct CollectFields<'a>(&'a mut Vec<(String, String)>);

impl<'kvs> VisitSource<'kvs> for CollectFields<'_> {
    fn visit_pair(
        &mut self,
        key: Key<'kvs>,
        value: Value<'kvs>,
    ) -> Result<(), kv::Error> {
        self.0.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

thread_local! {
    // Each test thread only sees what it logged itself
    static RECORDS: RefCell<Vec<Captured>> = RefCell::new(Vec::new());
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut fields = Vec::new();
        record
            .key_values()
            .visit(&mut CollectFields(&mut fields))
            .expect("collecting key-values cannot fail");
        RECORDS.with(|records| {
            records.borrow_mut().push(Captured {
                level: record.level(),
                target: record.target().to_owned(),
                message: record.args().to_string(),
                fields,
            })
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Installs the capturing logger once per test binary and forgets whatever
/// the current thread captured so far.
pub fn initialize() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("logger already installed");
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Records captured on the current thread under `target`.
pub fn records(target: &str) -> Vec<Captured> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|r| r.target == target)
            .cloned()
            .collect()
    })
}

pub fn messages(target: &str) -> Vec<String> {
    records(target).into_iter().map(|r| r.message).collect()
}
