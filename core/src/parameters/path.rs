use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

pub const PATH_SEPARATOR: &str = "::";

/// Position of a leaf parameter inside a configurable-parameters tree.
///
/// Encoded on the wire of the UI layer as `task::component[::group]::leaf`.
/// The path is synthetic: it is assigned by the mapper and never sent to the
/// server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterPath {
    pub task_id: String,
    pub component_id: String,
    pub group_id: Option<String>,
    pub parameter_id: String,
}

impl ParameterPath {
    pub fn flat(
        task_id: impl Into<String>,
        component_id: impl Into<String>,
        parameter_id: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            component_id: component_id.into(),
            group_id: None,
            parameter_id: parameter_id.into(),
        }
    }

    pub fn grouped(
        task_id: impl Into<String>,
        component_id: impl Into<String>,
        group_id: impl Into<String>,
        parameter_id: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            component_id: component_id.into(),
            group_id: Some(group_id.into()),
            parameter_id: parameter_id.into(),
        }
    }

    pub fn is_grouped(&self) -> bool {
        self.group_id.is_some()
    }

    pub fn segments(&self) -> Vec<&str> {
        let mut out = vec![self.task_id.as_str(), self.component_id.as_str()];
        if let Some(group_id) = &self.group_id {
            out.push(group_id);
        }
        out.push(&self.parameter_id);
        out
    }
}

impl fmt::Display for ParameterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join(PATH_SEPARATOR))
    }
}

impl FromStr for ParameterPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(PATH_SEPARATOR).collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(PathError::EmptySegment(s.to_string()));
        }
        match segments.as_slice() {
            [task_id, component_id, parameter_id] => {
                Ok(Self::flat(*task_id, *component_id, *parameter_id))
            }
            [task_id, component_id, group_id, parameter_id] => Ok(Self::grouped(
                *task_id,
                *component_id,
                *group_id,
                *parameter_id,
            )),
            _ => Err(PathError::SegmentCount(s.to_string())),
        }
    }
}

impl Serialize for ParameterPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_and_grouped() {
        let flat: ParameterPath = "t1::c1::p1".parse().unwrap();
        assert_eq!(flat, ParameterPath::flat("t1", "c1", "p1"));
        assert!(!flat.is_grouped());

        let grouped: ParameterPath = "t1::c1::g1::p1".parse().unwrap();
        assert_eq!(grouped.group_id.as_deref(), Some("g1"));
        assert_eq!(grouped.to_string(), "t1::c1::g1::p1");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert_eq!(
            "t1::c1".parse::<ParameterPath>(),
            Err(PathError::SegmentCount("t1::c1".to_string()))
        );
        assert!(matches!(
            "a::b::c::d::e".parse::<ParameterPath>(),
            Err(PathError::SegmentCount(_))
        ));
        assert!(matches!(
            "t1::::p1".parse::<ParameterPath>(),
            Err(PathError::EmptySegment(_))
        ));
    }

    #[test]
    fn test_serializes_as_joined_string() {
        let path = ParameterPath::grouped("t", "c", "g", "p");
        assert_eq!(serde_json::to_string(&path).unwrap(), r#""t::c::g::p""#);
    }
}
