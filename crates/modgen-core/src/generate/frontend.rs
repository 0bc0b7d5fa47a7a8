//! UI-facing module plans (`create`)

use crate::config::ProjectLayout;
use crate::generate::{join, public_route, GenerateError, GenerationPlan, PlannedFile};
use crate::manifest::{ModuleEntry, ModuleKind};
use crate::naming::{relative_import, to_kebab, to_pascal, ModulePath};
use crate::store::seed_records;
use crate::templates::{Template, TemplateContext};
use std::path::PathBuf;

/// Render every file for the frontend module `name`.
///
/// `name` is free text and is normalized to kebab-case. The page route defaults
/// to the normalized name; `route` overrides it.
pub fn plan(
    layout: &ProjectLayout,
    name: &str,
    route: Option<&str>,
) -> Result<GenerationPlan, GenerateError> {
    let kebab = to_kebab(name);
    let module_path = ModulePath::parse(&kebab).ok_or_else(|| GenerateError::InvalidName {
        what: "module name",
        input: name.to_string(),
    })?;
    let folder = module_path.folder_path();

    let route_path = match route {
        Some(raw) => ModulePath::parse(raw)
            .map(|p| p.folder_path())
            .ok_or_else(|| GenerateError::InvalidName {
                what: "route",
                input: raw.to_string(),
            })?,
        None => folder.clone(),
    };

    let type_name = to_pascal(&folder);
    let module_dir = join(&[layout.modules_dir.as_str(), folder.as_str()]);
    let page_dir = join(&[layout.routes_dir.as_str(), route_path.as_str()]);
    let page_route = public_route(layout, &page_dir);

    let seed = serde_json::to_string_pretty(&seed_records(&folder))
        .unwrap_or_else(|_| "[]".to_string());

    let ctx = TemplateContext::new()
        .with("type", type_name.as_str())
        .with("camel", lower_first(&type_name))
        .with("module", folder.as_str())
        .with("module_dir", module_dir.as_str())
        .with("page_dir", page_dir.as_str())
        .with("page_route", page_route.as_str())
        .with("seed", seed)
        .with(
            "counter_import",
            relative_import(&page_dir, &join(&[module_dir.as_str(), "counter.ts"])),
        );

    let in_module = |file: &str| PathBuf::from(join(&[module_dir.as_str(), file]));

    let files = vec![
        PlannedFile::create(in_module("types.ts"), Template::Types.render(&ctx)),
        PlannedFile::create(in_module("data.ts"), Template::Data.render(&ctx)),
        PlannedFile::create(in_module("service.ts"), Template::Service.render(&ctx)),
        PlannedFile::create(in_module("counter.ts"), Template::Counter.render(&ctx)),
        PlannedFile::create(in_module("spec.md"), Template::FrontendDoc.render(&ctx)),
        PlannedFile::create(join(&[page_dir.as_str(), "index.tsx"]), Template::Page.render(&ctx)),
    ];

    Ok(GenerationPlan {
        module_dir: PathBuf::from(&module_dir),
        type_name,
        files,
        entry: ModuleEntry {
            name: folder,
            kind: ModuleKind::Frontend,
            route: page_route,
        },
    })
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
