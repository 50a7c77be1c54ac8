//! Distributions and the distribution file envelope.
//!
//! A library is `[tag, packageName, dependencies, packageDefinition]` where
//! `dependencies` is `[[dependencyName, packageSpecification], ...]`.
//! Type attributes are unit and value attributes are `Type<()>`, so no
//! attribute codecs are taken here.
//!
//! Distribution files wrap this in `{"formatVersion": n, "distribution": [...]}`.

use super::attrs::{decode_unit, encode_unit};
use super::naming::{path_from_json, path_to_json};
use super::package::{
    package_definition_from_json, package_definition_to_json, package_specification_from_json,
    package_specification_to_json,
};
use super::tags::{DistributionTag, WireTag};
use super::types::{type_from_json, type_to_json};
use super::{FormatVersion, Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::ir::distribution::{Distribution, Library, LibraryDependency};
use crate::ir::types::Type;
use serde_json::{Value as Json, json};
use tracing::{debug, info};

pub fn distribution_to_json(
    options: &Options,
    distribution: &Distribution,
) -> Result<Json, CodecError> {
    let Distribution::Library(library) = distribution;
    let encode_va = |t: &Type<()>| type_to_json(options, &encode_unit, t);

    let dependencies = wire::encode_list(&library.dependencies, |dependency| {
        Ok(json!([
            path_to_json(&dependency.name),
            package_specification_to_json(options, &encode_unit, &dependency.spec)
                .context(|| format!("encode dependency {}", dependency.name))?
        ]))
    })?;
    let definition =
        package_definition_to_json(options, &encode_unit, &encode_va, &library.definition)?;

    Ok(json!([
        DistributionTag::Library.tag(options.format_version),
        path_to_json(&library.package_name),
        dependencies,
        definition
    ]))
}

pub fn distribution_from_json(options: &Options, json: &Json) -> Result<Distribution, CodecError> {
    let (tag, items) = wire::node(json, "Distribution")?;
    match DistributionTag::parse(options.format_version, tag)? {
        DistributionTag::Library => library_from_json(options, items).map(Distribution::Library),
    }
}

fn library_from_json(options: &Options, items: &[Json]) -> Result<Library, CodecError> {
    wire::arity("Library", items, 4)?;
    let decode_va = |j: &Json| type_from_json(options, &decode_unit, j);

    let package_name = path_from_json(&items[1]).context(|| "decode package name".into())?;
    let dependencies = wire::list(&items[2], "dependencies", |entry| {
        let pair = wire::tuple(entry, "dependency", 2)?;
        let name = path_from_json(&pair[0])?;
        let spec = package_specification_from_json(options, &decode_unit, &pair[1])
            .context(|| format!("decode dependency {name}"))?;
        Ok(LibraryDependency::new(name, spec))
    })?;
    let definition = package_definition_from_json(options, &decode_unit, &decode_va, &items[3])
        .context(|| "decode package definition".into())?;

    Ok(Library::new(package_name, dependencies, definition))
}

pub fn encode_distribution(
    options: &Options,
    distribution: &Distribution,
) -> Result<Vec<u8>, CodecError> {
    debug!(
        version = %options.format_version,
        package = %distribution.package_name(),
        "encode Distribution"
    );
    wire::render(&distribution_to_json(options, distribution)?)
}

pub fn decode_distribution(options: &Options, bytes: &[u8]) -> Result<Distribution, CodecError> {
    debug!(version = %options.format_version, len = bytes.len(), "decode Distribution");
    let distribution = distribution_from_json(options, &wire::parse(bytes)?)?;
    debug!(package = %distribution.package_name(), "decoded Distribution");
    Ok(distribution)
}

/// Write a distribution file at the given format version.
pub fn encode_versioned_distribution(
    version: FormatVersion,
    distribution: &Distribution,
) -> Result<Vec<u8>, CodecError> {
    let options = Options::new(version);
    let envelope = json!({
        "formatVersion": version.number(),
        "distribution": distribution_to_json(&options, distribution)?,
    });
    wire::render(&envelope)
}

/// Read a distribution file, taking the format version from its envelope.
pub fn decode_versioned_distribution(
    bytes: &[u8],
) -> Result<(FormatVersion, Distribution), CodecError> {
    const ENTITY: &str = "distribution file";
    let envelope = wire::parse(bytes)?;
    let map = wire::object(&envelope, ENTITY)?;

    let number = wire::field(map, ENTITY, "formatVersion")?;
    let version = number
        .as_u64()
        .ok_or_else(|| CodecError::InvalidValue {
            entity: "formatVersion",
            message: format!("expected a positive integer, got {number}"),
        })
        .and_then(FormatVersion::from_number)?;
    info!(%version, "reading distribution file");

    let distribution =
        distribution_from_json(&Options::new(version), wire::field(map, ENTITY, "distribution")?)?;
    Ok((version, distribution))
}
