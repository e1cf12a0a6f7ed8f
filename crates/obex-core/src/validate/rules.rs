//! Validation rules for bundle manifests.

use super::manifest::Manifest;
use super::manifest::lookup;
use super::report::UnitValidation;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Runs the per-object checks for one manifest.
pub(crate) fn check_manifest(manifest: &Manifest) -> UnitValidation {
    let mut unit = UnitValidation::new(manifest.display_name());

    if manifest.is_package() {
        check_package(manifest, &mut unit);
        return unit;
    }

    if manifest.api_version.is_none() {
        unit.errors.push("missing apiVersion".to_owned());
    }
    if manifest.name.is_none() {
        unit.errors.push("missing metadata.name".to_owned());
    }

    match manifest.kind.as_deref() {
        None => unit.errors.push("missing kind".to_owned()),
        Some(_) if manifest.is_csv() => check_csv(manifest, &mut unit),
        Some(_) if manifest.is_crd() => check_crd(manifest, &mut unit),
        Some(other) => unit.warnings.push(format!("unrecognized kind: {other}")),
    }

    unit
}

fn check_package(manifest: &Manifest, unit: &mut UnitValidation) {
    match manifest.doc.get("packageName").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => {}
        _ => unit
            .errors
            .push("package manifest has an empty packageName".to_owned()),
    }

    match manifest.doc.get("channels").and_then(Value::as_sequence) {
        Some(channels) if !channels.is_empty() => {
            for channel in channels {
                let name = channel.get("name").and_then(Value::as_str);
                if name.is_none() {
                    unit.errors.push("channel is missing a name".to_owned());
                }
                if channel.get("currentCSV").and_then(Value::as_str).is_none() {
                    unit.errors.push(format!(
                        "channel {} is missing currentCSV",
                        name.unwrap_or("<unnamed>")
                    ));
                }
            }
        }
        _ => unit
            .errors
            .push("package manifest declares no channels".to_owned()),
    }
}

fn check_csv(manifest: &Manifest, unit: &mut UnitValidation) {
    if lookup(&manifest.doc, &["spec", "version"]).is_none() {
        unit.errors.push("missing spec.version".to_owned());
    }
    if lookup(&manifest.doc, &["spec", "install", "strategy"]).is_none() {
        unit.errors.push("missing spec.install.strategy".to_owned());
    }
    if lookup(&manifest.doc, &["spec", "installModes"]).is_none() {
        unit.warnings
            .push("no spec.installModes declared".to_owned());
    }
}

fn check_crd(manifest: &Manifest, unit: &mut UnitValidation) {
    if lookup(&manifest.doc, &["spec", "group"]).is_none() {
        unit.errors.push("missing spec.group".to_owned());
    }
    if lookup(&manifest.doc, &["spec", "names", "kind"]).is_none() {
        unit.errors.push("missing spec.names.kind".to_owned());
    }

    let has_versions = lookup(&manifest.doc, &["spec", "versions"])
        .and_then(Value::as_sequence)
        .is_some_and(|versions| !versions.is_empty());
    // pre-apiextensions/v1 CRDs carry a single spec.version instead
    let has_legacy_version = lookup(&manifest.doc, &["spec", "version"]).is_some();
    if !has_versions && !has_legacy_version {
        unit.errors.push("no spec.versions declared".to_owned());
    }
}

/// Runs the bundle-level checks across all parsed manifests.
pub(crate) fn check_bundle(dir: &Path, manifests: &[Manifest], no_files: bool) -> UnitValidation {
    let csvs: Vec<&Manifest> = manifests.iter().filter(|m| m.is_csv()).collect();
    let crds: Vec<&Manifest> = manifests.iter().filter(|m| m.is_crd()).collect();

    let unit_name = csvs
        .first()
        .and_then(|m| m.name.clone())
        .unwrap_or_else(|| "bundle".to_owned());
    let mut unit = UnitValidation::new(unit_name);

    if no_files {
        unit.errors
            .push(format!("no manifest files found in {}", dir.display()));
        return unit;
    }

    match csvs.len() {
        0 => unit
            .errors
            .push("bundle contains no ClusterServiceVersion".to_owned()),
        1 => {}
        n => unit.errors.push(format!(
            "bundle contains {n} ClusterServiceVersions, expected exactly one"
        )),
    }

    let crd_names: Vec<&str> = crds.iter().filter_map(|m| m.name.as_deref()).collect();
    let mut owned_names: Vec<String> = Vec::new();
    if let Some(csv) = csvs.first() {
        let owned = lookup(&csv.doc, &["spec", "customresourcedefinitions", "owned"])
            .and_then(Value::as_sequence);
        if let Some(owned) = owned {
            for item in owned {
                if let Some(name) = item.get("name").and_then(Value::as_str) {
                    owned_names.push(name.to_owned());
                    if !crd_names.contains(&name) {
                        unit.errors
                            .push(format!("owned CRD {name} not found in bundle"));
                    }
                }
            }
        }
    }
    for crd_name in &crd_names {
        if !owned_names.iter().any(|owned| owned == crd_name) {
            unit.warnings.push(format!(
                "CRD {crd_name} is not owned by the ClusterServiceVersion"
            ));
        }
    }

    let mut seen: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for manifest in manifests {
        if let (Some(kind), Some(name)) = (manifest.kind.as_deref(), manifest.name.as_deref()) {
            *seen.entry((kind, name)).or_insert(0) += 1;
        }
    }
    for ((kind, name), count) in &seen {
        if *count > 1 {
            unit.errors.push(format!(
                "duplicate manifest: {kind} {name} appears {count} times"
            ));
        }
    }

    let csv_names: Vec<&str> = csvs.iter().filter_map(|m| m.name.as_deref()).collect();
    if let Some(package) = manifests.iter().find(|m| m.is_package()) {
        if let Some(channels) = package.doc.get("channels").and_then(Value::as_sequence) {
            for channel in channels {
                let channel_name = channel
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("<unnamed>");
                if let Some(current) = channel.get("currentCSV").and_then(Value::as_str) {
                    if !csv_names.contains(&current) {
                        unit.errors.push(format!(
                            "channel {channel_name} references missing CSV {current}"
                        ));
                    }
                }
            }
        }
    }

    unit
}
