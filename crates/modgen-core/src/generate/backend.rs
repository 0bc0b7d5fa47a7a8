//! API-facing module plans (`create-server`)

use crate::config::ProjectLayout;
use crate::generate::{join, public_route, GenerateError, GenerationPlan, PlannedFile};
use crate::manifest::{ModuleEntry, ModuleKind};
use crate::naming::{relative_import, ModulePath};
use crate::store::seed_records;
use crate::templates::{Template, TemplateContext};
use std::path::PathBuf;

/// Render every file for the backend module at `path`.
///
/// Module sources go to `<modules_dir>/<folder path>`, handlers to
/// `<api_dir>/<route path>/index.ts` and `<api_dir>/<route path>/[id]/index.ts`,
/// and the shared response helper is included if the project lacks one.
pub fn plan(layout: &ProjectLayout, path: &str) -> Result<GenerationPlan, GenerateError> {
    let module_path = ModulePath::parse(path).ok_or_else(|| GenerateError::InvalidName {
        what: "module path",
        input: path.to_string(),
    })?;

    let type_name = module_path.type_name();
    let module_dir = join(&[layout.modules_dir.as_str(), module_path.folder_path().as_str()]);
    let api_dir = join(&[layout.api_dir.as_str(), module_path.route_path().as_str()]);
    let detail_dir = join(&[api_dir.as_str(), "[id]"]);
    let api_route = public_route(layout, &api_dir);

    let seed = serde_json::to_string_pretty(&seed_records(module_path.leaf()))
        .unwrap_or_else(|_| "[]".to_string());

    let ctx = TemplateContext::new()
        .with("type", type_name.as_str())
        .with("module", module_path.folder_path())
        .with("module_dir", module_dir.as_str())
        .with("api_dir", api_dir.as_str())
        .with("api_route", api_route.as_str())
        .with("seed", seed);

    let route_ctx = |from_dir: &str| {
        let import = |file: &str| relative_import(from_dir, &join(&[module_dir.as_str(), file]));
        ctx.clone()
            .with("types_import", import("types.ts"))
            .with("data_import", import("data.ts"))
            .with("service_import", import("service.ts"))
            .with(
                "response_import",
                relative_import(from_dir, &layout.response_helper),
            )
    };

    let in_module = |file: &str| PathBuf::from(join(&[module_dir.as_str(), file]));

    let files = vec![
        PlannedFile::create(in_module("types.ts"), Template::Types.render(&ctx)),
        PlannedFile::create(in_module("data.ts"), Template::Data.render(&ctx)),
        PlannedFile::create(in_module("service.ts"), Template::Service.render(&ctx)),
        PlannedFile::create(in_module("spec.md"), Template::BackendDoc.render(&ctx)),
        PlannedFile::create(
            join(&[api_dir.as_str(), "index.ts"]),
            Template::ListRoute.render(&route_ctx(&api_dir)),
        ),
        PlannedFile::create(
            join(&[detail_dir.as_str(), "index.ts"]),
            Template::DetailRoute.render(&route_ctx(&detail_dir)),
        ),
        PlannedFile::create_if_absent(
            layout.response_helper.as_str(),
            Template::Response.render(&ctx),
        ),
    ];

    Ok(GenerationPlan {
        module_dir: PathBuf::from(&module_dir),
        type_name,
        files,
        entry: ModuleEntry {
            name: module_path.folder_path(),
            kind: ModuleKind::Backend,
            route: api_route,
        },
    })
}
