//! Capabilities of the host runtime, derived once from its version.

use crate::adapters::{Positional, PositionalTransformer, Stage2Transformer};
use semver::Version;

/// Host versions from this minor onward read locations from the tree.
const AST_LOCATIONS_SINCE_MINOR: u64 = 52;

/// Host versions from this minor onward call transformers with a packed request.
const PACKED_CALLS_SINCE_MINOR: u64 = 46;

/// How the host consumes location data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegrationMode {
    /// Locations are read from `loc` annotations on the returned tree.
    AstLocations,
    /// Locations are read from a standalone map next to the code.
    StandaloneMap,
}

/// How the host calls its stage-2 transformer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallConvention {
    /// `transform(src, filename, options)`.
    Positional,
    /// `transform({ src, filename, options })`.
    Packed,
}

/// What the pipeline needs to know about the host runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostCapabilities {
    /// The host runtime version.
    pub version: Version,
    /// Where the host reads locations from.
    pub mode: IntegrationMode,
    /// How the host's transformer is called.
    pub call_convention: CallConvention,
}

impl HostCapabilities {
    /// Derives capabilities from the host runtime version.
    pub fn from_version(version: Version) -> Self {
        let minor = if version.major > 0 { u64::MAX } else { version.minor };
        let mode = if minor >= AST_LOCATIONS_SINCE_MINOR {
            IntegrationMode::AstLocations
        } else {
            IntegrationMode::StandaloneMap
        };
        let call_convention = if minor >= PACKED_CALLS_SINCE_MINOR {
            CallConvention::Packed
        } else {
            CallConvention::Positional
        };
        Self {
            version,
            mode,
            call_convention,
        }
    }

    /// Parses a version string and derives capabilities from it.
    pub fn parse(version: &str) -> Result<Self, semver::Error> {
        Ok(Self::from_version(Version::parse(version)?))
    }

    /// Picks how the host's transformer is driven.
    ///
    /// Hosts that pass a packed request get `transformer` as is; older hosts
    /// get it behind [`Positional`], which calls the positional entry point
    /// and reports no fingerprint.
    pub fn select<T>(&self, transformer: T) -> Box<dyn Stage2Transformer>
    where
        T: Stage2Transformer + PositionalTransformer + 'static,
    {
        match self.call_convention {
            CallConvention::Packed => Box::new(transformer),
            CallConvention::Positional => Box::new(Positional(transformer)),
        }
    }
}
