//! Package specifications and definitions: `{"modules": [[moduleName, module], ...]}`.

use super::attrs::{AttrDecoder, AttrEncoder};
use super::module::{
    module_definition_from_json, module_definition_to_json, module_specification_from_json,
    module_specification_to_json,
};
use super::naming::{path_from_json, path_to_json};
use super::wrappers::{access_controlled_from_json, access_controlled_to_json};
use super::{Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::ir::package::{PackageDefinition, PackageSpecification};
use crate::naming::ModuleName;
use serde_json::{Value as Json, json};
use tracing::{debug, trace};

fn modules_to_json<T, F>(modules: &[(ModuleName, T)], mut encode: F) -> Result<Json, CodecError>
where
    F: FnMut(&T) -> Result<Json, CodecError>,
{
    let modules = wire::encode_list(modules, |(name, module)| {
        let encoded = encode(module).context(|| format!("encode module {name}"))?;
        Ok(json!([path_to_json(name), encoded]))
    })?;
    Ok(json!({ "modules": modules }))
}

fn modules_from_json<T, F>(
    json: &Json,
    entity: &'static str,
    mut decode: F,
) -> Result<Vec<(ModuleName, T)>, CodecError>
where
    F: FnMut(&Json) -> Result<T, CodecError>,
{
    let map = wire::object(json, entity)?;
    wire::list(wire::field(map, entity, "modules")?, "modules", |item| {
        let pair = wire::tuple(item, "module entry", 2)?;
        let name = path_from_json(&pair[0])?;
        trace!(module = %name, "decode module");
        let module = decode(&pair[1]).context(|| format!("decode module {name}"))?;
        Ok((name, module))
    })
}

pub fn package_specification_to_json<TA, ET>(
    options: &Options,
    encode_ta: &ET,
    specification: &PackageSpecification<TA>,
) -> Result<Json, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
{
    modules_to_json(&specification.modules, |module| {
        module_specification_to_json(options, encode_ta, module)
    })
}

pub fn package_specification_from_json<TA, DT>(
    options: &Options,
    decode_ta: &DT,
    json: &Json,
) -> Result<PackageSpecification<TA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
{
    let modules = modules_from_json(json, "PackageSpecification", |j| {
        module_specification_from_json(options, decode_ta, j)
    })?;
    Ok(PackageSpecification::new(modules))
}

pub fn package_definition_to_json<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    definition: &PackageDefinition<TA, VA>,
) -> Result<Json, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    modules_to_json(&definition.modules, |module| {
        access_controlled_to_json(
            options,
            |m| module_definition_to_json(options, encode_ta, encode_va, m),
            module,
        )
    })
}

pub fn package_definition_from_json<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    json: &Json,
) -> Result<PackageDefinition<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    let modules = modules_from_json(json, "PackageDefinition", |j| {
        access_controlled_from_json(
            options,
            |m| module_definition_from_json(options, decode_ta, decode_va, m),
            j,
        )
    })?;
    Ok(PackageDefinition::new(modules))
}

pub fn encode_package_specification<TA, ET>(
    options: &Options,
    encode_ta: &ET,
    specification: &PackageSpecification<TA>,
) -> Result<Vec<u8>, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
{
    debug!(
        version = %options.format_version,
        modules = specification.modules.len(),
        "encode PackageSpecification"
    );
    wire::render(&package_specification_to_json(options, encode_ta, specification)?)
}

pub fn decode_package_specification<TA, DT>(
    options: &Options,
    decode_ta: &DT,
    bytes: &[u8],
) -> Result<PackageSpecification<TA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode PackageSpecification");
    package_specification_from_json(options, decode_ta, &wire::parse(bytes)?)
}

pub fn encode_package_definition<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    definition: &PackageDefinition<TA, VA>,
) -> Result<Vec<u8>, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    debug!(
        version = %options.format_version,
        modules = definition.modules.len(),
        "encode PackageDefinition"
    );
    wire::render(&package_definition_to_json(options, encode_ta, encode_va, definition)?)
}

pub fn decode_package_definition<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    bytes: &[u8],
) -> Result<PackageDefinition<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode PackageDefinition");
    package_definition_from_json(options, decode_ta, decode_va, &wire::parse(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::json::attrs::{decode_unit, encode_unit};
    use crate::ir::access::AccessControlled;
    use crate::ir::module::{ModuleDefinition, ModuleSpecification};
    use crate::naming::Path;

    #[test]
    fn test_package_specification_shape() {
        let spec: PackageSpecification<()> = PackageSpecification::new(vec![(
            Path::from("Foo.Bar"),
            ModuleSpecification::default(),
        )]);
        let encoded = package_specification_to_json(&Options::v3(), &encode_unit, &spec).unwrap();
        assert_eq!(
            encoded,
            json!({"modules": [[[["foo"], ["bar"]], {"types": [], "values": [], "doc": null}]]})
        );
    }

    #[test]
    fn test_package_definition_round_trip() {
        let definition: PackageDefinition<(), ()> = PackageDefinition::new(vec![
            (Path::from("Api"), AccessControlled::public(ModuleDefinition::default())),
            (Path::from("Internal"), AccessControlled::private(ModuleDefinition::default())),
        ]);
        for options in [Options::v1(), Options::v2(), Options::v3()] {
            let bytes =
                encode_package_definition(&options, &encode_unit, &encode_unit, &definition)
                    .unwrap();
            let decoded: PackageDefinition<(), ()> =
                decode_package_definition(&options, &decode_unit, &decode_unit, &bytes).unwrap();
            assert_eq!(decoded, definition);
        }
    }

    #[test]
    fn test_missing_modules() {
        let err =
            package_specification_from_json::<(), _>(&Options::v3(), &decode_unit, &json!({}))
                .unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingField { entity: "PackageSpecification", field: "modules" }
        ));
    }
}
