//! Chain walks over JSON records with configurable field names.
//!
//! Records are `serde_json::Value`s. The link, identifier and merge
//! property are looked up by the names in [`ChainConfig`]; a missing field
//! and an explicit `null` are both treated as absent. In direct mode the
//! link field holds the next record inline; in by-id mode it holds an
//! identifier resolved against a flat array of records.

pub mod matching;

use std::borrow::Cow;
use std::future::Future;
use std::path::Path;

use serde_json::Value;

use crate::chain::{
    fold_chain, merge_chain, try_fold_chain, try_fold_chain_async, try_merge_chain, ChainWalker,
    DirectLink, IdLink, Lineage, Resolve,
};
use crate::config::ChainConfig;
use crate::error::{ChainWalkError, Result};

/// Field reader bound to one field name.
pub type FieldReader<'a> = Box<dyn Fn(&'a Value) -> Option<&'a Value> + Send + Sync + 'a>;

/// Read a field from a JSON object, treating `null` as absent.
pub fn field<'v>(record: &'v Value, name: &str) -> Option<&'v Value> {
    record.get(name).filter(|value| !value.is_null())
}

fn reader<'a>(name: &'a str) -> FieldReader<'a> {
    Box::new(move |record: &'a Value| field(record, name))
}

// ---------------------------------------------------------------------------
// JsonResolver
// ---------------------------------------------------------------------------

/// Resolver for JSON records, built by [`JsonChain::resolver`].
pub enum JsonResolver<'a> {
    Direct(DirectLink<FieldReader<'a>>),
    ById(IdLink<'a, Value, Value, FieldReader<'a>, FieldReader<'a>, fn(&Value, &Value) -> bool>),
}

impl<'a> Resolve<'a, Value> for JsonResolver<'a> {
    fn resolve(&mut self, node: &'a Value) -> Option<&'a Value> {
        match self {
            Self::Direct(link) => link.resolve(node),
            Self::ById(link) => link.resolve(node),
        }
    }
}

// ---------------------------------------------------------------------------
// JsonChain
// ---------------------------------------------------------------------------

/// Call and merge traversals over JSON records.
#[derive(Debug, Clone, Copy)]
pub struct JsonChain<'a> {
    config: &'a ChainConfig,
    nodes: Option<&'a [Value]>,
}

impl<'a> JsonChain<'a> {
    /// Records link to their successor inline.
    pub fn direct(config: &'a ChainConfig) -> Self {
        Self {
            config,
            nodes: None,
        }
    }

    /// Records link to their successor by identifier within `nodes`.
    pub fn by_id(config: &'a ChainConfig, nodes: &'a [Value]) -> Self {
        Self {
            config,
            nodes: Some(nodes),
        }
    }

    pub fn config(&self) -> &'a ChainConfig {
        self.config
    }

    pub fn is_by_id(&self) -> bool {
        self.nodes.is_some()
    }

    /// The record's own identifier.
    pub fn id_of(&self, record: &'a Value) -> Option<&'a Value> {
        field(record, &self.config.id)
    }

    /// The record's merge property value.
    pub fn property(&self, record: &'a Value) -> Option<&'a Value> {
        field(record, &self.config.merge_property)
    }

    /// First record in the collection whose identifier matches `id` under
    /// the configured match mode. Always `None` in direct mode.
    pub fn find(&self, id: &Value) -> Option<&'a Value> {
        match self.resolver() {
            JsonResolver::ById(link) => link.lookup(id),
            JsonResolver::Direct(_) => None,
        }
    }

    /// A fresh resolver for one walk.
    pub fn resolver(&self) -> JsonResolver<'a> {
        let config: &'a ChainConfig = self.config;
        match self.nodes {
            None => JsonResolver::Direct(DirectLink::new(reader(&config.link))),
            Some(nodes) => JsonResolver::ById(IdLink::with_matcher(
                nodes,
                reader(&config.link),
                reader(&config.id),
                matching::matcher(config.id_match),
            )),
        }
    }

    pub fn lineage(&self, start: &'a Value) -> Lineage<'a, Value> {
        ChainWalker::new(start, self.resolver()).into_lineage()
    }

    pub fn call<A, D, F>(&self, start: &'a Value, data: &D, callback: F) -> A
    where
        D: ?Sized,
        F: FnMut(&'a Value, Option<A>, &D) -> A,
    {
        fold_chain(start, self.resolver(), data, callback)
    }

    pub fn try_call<A, D, E, F>(&self, start: &'a Value, data: &D, callback: F) -> std::result::Result<A, E>
    where
        D: ?Sized,
        F: FnMut(&'a Value, Option<A>, &D) -> std::result::Result<A, E>,
    {
        try_fold_chain(start, self.resolver(), data, callback)
    }

    pub async fn call_async<'d, A, D, E, F, Fut>(
        &self,
        start: &'a Value,
        data: &'d D,
        callback: F,
    ) -> std::result::Result<A, E>
    where
        D: ?Sized,
        F: FnMut(&'a Value, Option<A>, &'d D) -> Fut,
        Fut: Future<Output = std::result::Result<A, E>>,
    {
        try_fold_chain_async(start, self.resolver(), data, callback).await
    }

    /// Merge the configured property along the chain.
    pub fn merge<M>(&self, start: &'a Value, merge: M) -> Option<Cow<'a, Value>>
    where
        M: FnMut(Cow<'a, Value>, &'a Value) -> Value,
    {
        let prop = reader(&self.config.merge_property);
        merge_chain(start, self.resolver(), prop, merge)
    }

    pub fn try_merge<E, M>(&self, start: &'a Value, merge: M) -> std::result::Result<Option<Cow<'a, Value>>, E>
    where
        M: FnMut(Cow<'a, Value>, &'a Value) -> std::result::Result<Value, E>,
    {
        let prop = reader(&self.config.merge_property);
        try_merge_chain(start, self.resolver(), prop, merge)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| ChainWalkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// View a parsed document as a record collection (a JSON array).
pub fn as_collection(document: &Value) -> Result<&[Value]> {
    document
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ChainWalkError::InvalidNodes {
            message: format!(
                "expected an array of records, found {}",
                json_kind(document)
            ),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
