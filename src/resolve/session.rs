//! Per-run resolution state
//!
//! A [`Session`] owns everything one resolution run mutates: the memo
//! cache, the cycle guard and the counters. The index and mode table it
//! reads are borrowed and never change during the run.

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::classify::{is_tagged_alias, Alias, Classifier, ModeValue};
use crate::color::ColorFormat;
use crate::index::VariableIndex;
use crate::modes::ModeNames;
use crate::stats::ResolutionStats;
use crate::variable::DEFAULT_MODE;

/// Memo key: alias target plus the structural path it was met at.
type CacheKey = (String, String);

/// State for one resolution run over one document.
#[derive(Debug)]
pub struct Session<'a> {
    index: &'a VariableIndex,
    modes: &'a ModeNames,
    classifier: Classifier,
    color_format: ColorFormat,
    cache: HashMap<CacheKey, Value>,
    in_progress: HashSet<CacheKey>,
    /// Keys already counted as dangling, so repeats are not recounted
    failed: HashSet<CacheKey>,
    /// Keys whose chain loops back on itself
    cyclic: HashSet<CacheKey>,
    /// Bumped whenever a lookup runs into a cycle
    cycle_hits: usize,
    stats: ResolutionStats,
}

impl<'a> Session<'a> {
    /// Start a run against a built index.
    pub fn new(
        index: &'a VariableIndex,
        modes: &'a ModeNames,
        classifier: Classifier,
        color_format: ColorFormat,
    ) -> Self {
        Self {
            index,
            modes,
            classifier,
            color_format,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
            failed: HashSet::new(),
            cyclic: HashSet::new(),
            cycle_hits: 0,
            stats: ResolutionStats { total_variables: index.len(), ..Default::default() },
        }
    }

    /// Dereference an alias met at `path`.
    ///
    /// Returns `None` when the target is missing or the chain loops back on
    /// itself; the alias is then counted as unresolved. Every alias on a
    /// cycle fails, not only the one that closes it.
    pub fn try_resolve(&mut self, alias: Alias<'_>, path: &str) -> Option<Value> {
        let Some(target) = alias.target else {
            log::debug!("alias at '{}' has no target id", path);
            self.stats.unresolved_aliases += 1;
            return None;
        };

        let key = (target.to_string(), path.to_string());
        if let Some(hit) = self.cache.get(&key) {
            log::trace!("cache hit for '{}' at '{}'", target, path);
            return Some(hit.clone());
        }
        if self.failed.contains(&key) {
            return None;
        }
        if self.cyclic.contains(&key) {
            self.cycle_hits += 1;
            return None;
        }
        if self.in_progress.contains(&key) {
            // Counted once the frame that owns the key unwinds
            log::warn!("alias cycle through '{}' at '{}', leaving it unresolved", target, path);
            self.cycle_hits += 1;
            return None;
        }

        let index = self.index;
        if let Some(variable) = index.lookup(target) {
            log::trace!("'{}' -> variable '{}'", target, variable.name);
            let hits_before = self.cycle_hits;
            self.in_progress.insert(key.clone());
            let value = self.resolve_modes(&variable.modes, &variable.name, true);
            self.in_progress.remove(&key);
            if self.cycle_hits > hits_before {
                log::debug!("alias '{}' at '{}' is part of a cycle", target, path);
                self.stats.unresolved_aliases += 1;
                self.cyclic.insert(key);
                return None;
            }
            self.cache.insert(key, value.clone());
            self.stats.resolved_aliases += 1;
            return Some(value);
        }

        if let Some(primitive) = index.find_primitive(target) {
            log::trace!("'{}' -> primitive table match", target);
            self.cache.insert(key, primitive.clone());
            self.stats.resolved_aliases += 1;
            return Some(primitive.clone());
        }

        log::debug!("dangling alias '{}' at '{}'", target, path);
        self.stats.unresolved_aliases += 1;
        self.failed.insert(key);
        None
    }

    /// Dereference an alias, or hand back the alias itself when it cannot be.
    pub fn resolve(&mut self, alias: Alias<'_>, path: &str) -> Value {
        self.try_resolve(alias, path).unwrap_or_else(|| alias.raw.clone())
    }

    /// Resolve every value of a mode map and rename its keys.
    ///
    /// Aliases are resolved under the path `"{owner}.{modeId}"`. With
    /// `collapse`, a map left holding only a `default` entry becomes that
    /// entry's bare value.
    pub fn resolve_modes(&mut self, modes: &Map<String, Value>, owner: &str, collapse: bool) -> Value {
        let mut resolved = Map::new();
        for (mode_id, value) in modes {
            let name = self.modes.normalize(mode_id);
            let out = match self.classifier.classify(value) {
                ModeValue::Alias(alias) => self.resolve(alias, &format!("{}.{}", owner, mode_id)),
                ModeValue::Primitive(primitive) => {
                    self.stats.primitive_values += 1;
                    primitive.into_value(self.color_format)
                }
                ModeValue::Unknown(other) => other.clone(),
            };
            resolved.insert(name, out);
        }

        if collapse && resolved.len() == 1 {
            if let Some(value) = resolved.remove(DEFAULT_MODE) {
                return value;
            }
        }
        Value::Object(resolved)
    }

    /// Rewrite a document subtree with every resolvable alias replaced.
    pub fn rewrite(&mut self, node: &Value, path: &str) -> Value {
        match node {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let item_path = join(path, &i.to_string());
                        if is_tagged_alias(item) {
                            if let ModeValue::Alias(alias) = self.classifier.classify(item) {
                                return self.resolve(alias, &item_path);
                            }
                        }
                        self.rewrite(item, &item_path)
                    })
                    .collect(),
            ),
            Value::Object(map) => Value::Object(self.rewrite_object(map, path)),
            scalar => scalar.clone(),
        }
    }

    fn rewrite_object(&mut self, map: &Map<String, Value>, path: &str) -> Map<String, Value> {
        let owner = map
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(path)
            .to_string();

        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            let child_path = join(path, key);
            let rewritten = match self.classifier.classify(value) {
                ModeValue::Alias(alias) => match self.try_resolve(alias, &child_path) {
                    Some(resolved) => resolved,
                    None if alias.tagged => value.clone(),
                    None => self.rewrite(value, &child_path),
                },
                _ => match value {
                    Value::Object(modes) if key == "modes" || key == "valuesByMode" => {
                        self.resolve_modes(modes, &owner, false)
                    }
                    _ => self.rewrite(value, &child_path),
                },
            };
            out.insert(key.clone(), rewritten);
        }
        out
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> ResolutionStats {
        self.stats
    }

    /// End the run, returning its counters.
    pub fn finish(self) -> ResolutionStats {
        self.stats
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
