use std::collections::BTreeMap;
use std::fmt;

use log::kv::{self, Key, Source, Value, VisitSource};
use log::{Level, Record};
use serde::{Deserialize, Serialize};

use crate::Result;

pub const DEFAULT_TARGET: &str = "iter_boons";

/// Options forwarded to the `log` facade by the logging adapters.
///
/// By default records go out at `WARN` under
/// [`DEFAULT_TARGET`], with the element text as the whole message and no
/// key-values attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Severity every record is emitted at
    pub level: Level,
    /// Overrides the record target
    pub target: Option<String>,
    /// Text put in front of every message, separated by a space
    pub prefix: Option<String>,
    /// Structured key-values attached to every record
    pub fields: BTreeMap<String, String>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: Level::Warn,
            target: None,
            prefix: None,
            fields: BTreeMap::new(),
        }
    }
}

impl LogOptions {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_target<S: Into<String>>(mut self, target: S) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Attaches `key = value` to every record, replacing an earlier value
    /// for the same key.
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Parses options from a JSON object, e.g. a section of a config file.
    ///
    /// Missing keys fall back to [`LogOptions::default`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Emits one record carrying `message` according to these options.
    pub(crate) fn emit(&self, message: &str) {
        if self.level > log::STATIC_MAX_LEVEL
            || self.level > log::max_level()
        {
            return;
        }
        match &self.prefix {
            Some(prefix) => {
                self.dispatch(format_args!("{} {}", prefix, message))
            }
            None => self.dispatch(format_args!("{}", message)),
        }
    }

    fn dispatch(&self, args: fmt::Arguments<'_>) {
        let target = self.target.as_deref().unwrap_or(DEFAULT_TARGET);
        let fields = Fields(&self.fields);
        log::logger().log(
            &Record::builder()
                .args(args)
                .level(self.level)
                .target(target)
                .module_path_static(Some(module_path!()))
                .file_static(Some(file!()))
                .line(Some(line!()))
                .key_values(&fields)
                .build(),
        );
    }
}

struct Fields<'a>(&'a BTreeMap<String, String>);

impl Source for Fields<'_> {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn VisitSource<'kvs>,
    ) -> std::result::Result<(), kv::Error> {
        for (key, value) in self.0 {
            visitor
                .visit_pair(Key::from_str(key), Value::from(value.as_str()))?;
        }
        Ok(())
    }
}
