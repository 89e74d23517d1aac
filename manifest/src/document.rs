//! Parsed object view of a manifest.
//!
//! The tree comes from a full YAML parse and carries no positions; callers pair it with the
//! structural resolvers, which map a line to the item indices used to walk the tree.

use serde_yaml::Value;

use crate::error::{ManifestError, Result};

/// Top-level keys that declare the extension's data source.
pub const DATASOURCES: &[&str] = &[
    "prometheus",
    "snmp",
    "wmi",
    "sqlMySql",
    "sqlServer",
    "sqlOracle",
    "sqlPostgres",
    "sqlDb2",
    "sqlHana",
    "sqlSnowflake",
    "jmx",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ManifestTree {
    root: Value,
}

/// One `topology.relationships` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship<'a> {
    pub from_type: &'a str,
    pub to_type: &'a str,
    pub type_of_relation: &'a str,
}

/// A datasource group or subgroup with the dimensions in effect for its metrics.
///
/// Subgroups inherit the dimensions of their parent group.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricGroup<'a> {
    pub node: &'a Value,
    pub dimension_keys: Vec<&'a str>,
    pub metric_keys: Vec<&'a str>,
}

impl Default for ManifestTree {
    /// An empty document: every accessor returns nothing.
    fn default() -> Self {
        Self {
            root: Value::Mapping(serde_yaml::Mapping::new()),
        }
    }
}

impl ManifestTree {
    pub fn parse(text: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(text)?;
        if !root.is_mapping() {
            return Err(ManifestError::NotAMapping);
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Top-level value for `key`, `Value::Null` when absent.
    pub fn get(&self, key: &str) -> &Value {
        &self.root[key]
    }

    pub fn topology_types(&self) -> &[Value] {
        seq(&self.root["topology"]["types"])
    }

    /// Names of the entity types declared under `topology.types`, in document order.
    pub fn entity_types(&self) -> Vec<&str> {
        self.topology_types()
            .iter()
            .filter_map(|ty| str_field(ty, "name"))
            .collect()
    }

    pub fn relationships(&self) -> Vec<Relationship<'_>> {
        seq(&self.root["topology"]["relationships"])
            .iter()
            .filter_map(|rel| {
                Some(Relationship {
                    from_type: str_field(rel, "fromType")?,
                    to_type: str_field(rel, "toType")?,
                    type_of_relation: str_field(rel, "typeOfRelation").unwrap_or(""),
                })
            })
            .collect()
    }

    pub fn screens(&self) -> &[Value] {
        seq(&self.root["screens"])
    }

    /// The first known datasource key and its groups.
    pub fn datasource(&self) -> Option<(&'static str, &[Value])> {
        DATASOURCES
            .iter()
            .find(|key| self.root.get(**key).is_some())
            .map(|key| (*key, seq(&self.root[*key])))
    }

    pub fn metric_groups(&self) -> Vec<MetricGroup<'_>> {
        let Some((_, groups)) = self.datasource() else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for group in groups {
            let group_dims = field_values(group, "dimensions", "key");
            out.push(MetricGroup {
                node: group,
                dimension_keys: group_dims.clone(),
                metric_keys: field_values(group, "metrics", "key"),
            });
            for subgroup in seq(&group["subgroups"]) {
                let mut dimension_keys = group_dims.clone();
                dimension_keys.extend(field_values(subgroup, "dimensions", "key"));
                out.push(MetricGroup {
                    node: subgroup,
                    dimension_keys,
                    metric_keys: field_values(subgroup, "metrics", "key"),
                });
            }
        }
        out
    }

    /// Metric keys from the datasource and the top-level `metrics` metadata, deduplicated
    /// in document order.
    pub fn metric_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        let datasource = self
            .metric_groups()
            .into_iter()
            .flat_map(|group| group.metric_keys);
        let metadata = seq(&self.root["metrics"])
            .iter()
            .filter_map(|metric| str_field(metric, "key"));
        for key in datasource.chain(metadata) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

/// Sequence items of `value`, or an empty slice if it is not a sequence.
pub fn seq(value: &Value) -> &[Value] {
    value.as_sequence().map(Vec::as_slice).unwrap_or(&[])
}

pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str()
}

/// `field` of every item in the `list` sequence of `value`.
pub fn field_values<'a>(value: &'a Value, list: &str, field: &str) -> Vec<&'a str> {
    seq(&value[list])
        .iter()
        .filter_map(|item| str_field(item, field))
        .collect()
}
