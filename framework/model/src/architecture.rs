use std::path::PathBuf;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The hardware family described by an architecture configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureKind {
    /// Gate-based: qubits are routed with SWAP and bridge gates.
    Gate,
    /// Shuttling-based: atoms are physically moved by AODs.
    Shuttling,
    /// Both routing mechanisms are available.
    Hybrid,
}

impl ArchitectureKind {
    /// Five character flag used in the `g s h` report column.
    pub fn report_flag(&self) -> &'static str {
        match self {
            ArchitectureKind::Gate => "g    ",
            ArchitectureKind::Shuttling => "  s  ",
            ArchitectureKind::Hybrid => "    h",
        }
    }
}

impl FromStr for ArchitectureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gate" => Ok(ArchitectureKind::Gate),
            "shuttling" => Ok(ArchitectureKind::Shuttling),
            "hybrid" => Ok(ArchitectureKind::Hybrid),
            other => Err(format!("Unknown architecture kind: {other}")),
        }
    }
}

impl fmt::Display for ArchitectureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchitectureKind::Gate => write!(f, "gate"),
            ArchitectureKind::Shuttling => write!(f, "shuttling"),
            ArchitectureKind::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// One architecture configuration that the mapping tool can be pointed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureVariant {
    pub kind: ArchitectureKind,
    /// Path to the architecture JSON description, passed to the tool as-is.
    pub config_path: PathBuf,
}

impl ArchitectureVariant {
    pub fn new(kind: ArchitectureKind, config_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            config_path: config_path.into(),
        }
    }
}

/// Initial placement heuristic for logical-to-physical qubit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMapping {
    Trivial,
    Random,
    Graph,
}

impl CoordinateMapping {
    /// Five character flag used in the `t r g` report column.
    pub fn report_flag(&self) -> &'static str {
        match self {
            CoordinateMapping::Trivial => "t    ",
            CoordinateMapping::Random => "  r  ",
            CoordinateMapping::Graph => "    g",
        }
    }
}

impl FromStr for CoordinateMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trivial" => Ok(CoordinateMapping::Trivial),
            "random" => Ok(CoordinateMapping::Random),
            "graph" => Ok(CoordinateMapping::Graph),
            other => Err(format!("Unknown coordinate mapping: {other}")),
        }
    }
}

impl fmt::Display for CoordinateMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateMapping::Trivial => write!(f, "trivial"),
            CoordinateMapping::Random => write!(f, "random"),
            CoordinateMapping::Graph => write!(f, "graph"),
        }
    }
}
