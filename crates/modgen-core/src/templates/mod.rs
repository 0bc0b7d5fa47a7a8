//! Fixed template bodies and placeholder rendering
//!
//! This module provides:
//! - The embedded template bodies for every generated file kind ([`Template`])
//! - `{{key}}` placeholder interpolation ([`TemplateContext`])

pub mod render;

pub use render::TemplateContext;

/// Every file kind the generators can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Record, filter and input types
    Types,
    /// Seed records and store factory
    Data,
    /// CRUD service operations over an injected store
    Service,
    /// Shared HTTP response helper, one per project
    Response,
    /// Collection route handlers (list, create)
    ListRoute,
    /// Item route handlers (get, update, delete)
    DetailRoute,
    /// Markdown stub for a backend module
    BackendDoc,
    /// Signal-held counter state and mutators
    Counter,
    /// Page component rendering the counter
    Page,
    /// Markdown stub for a frontend module
    FrontendDoc,
}

impl Template {
    pub fn body(&self) -> &'static str {
        match self {
            Template::Types => include_str!("../../templates/shared/types.ts.tmpl"),
            Template::Data => include_str!("../../templates/shared/data.ts.tmpl"),
            Template::Service => include_str!("../../templates/shared/service.ts.tmpl"),
            Template::Response => include_str!("../../templates/shared/response.ts.tmpl"),
            Template::ListRoute => include_str!("../../templates/backend/list_route.ts.tmpl"),
            Template::DetailRoute => include_str!("../../templates/backend/detail_route.ts.tmpl"),
            Template::BackendDoc => include_str!("../../templates/backend/spec.md.tmpl"),
            Template::Counter => include_str!("../../templates/frontend/counter.ts.tmpl"),
            Template::Page => include_str!("../../templates/frontend/page.tsx.tmpl"),
            Template::FrontendDoc => include_str!("../../templates/frontend/spec.md.tmpl"),
        }
    }

    /// Render this template against `ctx`
    pub fn render(&self, ctx: &TemplateContext) -> String {
        ctx.render(self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Template; 10] = [
        Template::Types,
        Template::Data,
        Template::Service,
        Template::Response,
        Template::ListRoute,
        Template::DetailRoute,
        Template::BackendDoc,
        Template::Counter,
        Template::Page,
        Template::FrontendDoc,
    ];

    fn full_context() -> TemplateContext {
        let mut ctx = TemplateContext::new();
        for key in [
            "type",
            "camel",
            "module",
            "module_dir",
            "seed",
            "types_import",
            "data_import",
            "service_import",
            "response_import",
            "counter_import",
            "api_route",
            "api_dir",
            "page_route",
            "page_dir",
        ] {
            ctx.insert(key, "X");
        }
        ctx
    }

    #[test]
    fn test_every_placeholder_is_known() {
        let ctx = full_context();
        for template in ALL {
            let rendered = template.render(&ctx);
            assert!(
                ctx.unresolved(&rendered).is_empty(),
                "{:?} left placeholders: {:?}",
                template,
                ctx.unresolved(&rendered)
            );
        }
    }

    #[test]
    fn test_response_helper_status_codes() {
        let body = Template::Response.body();
        for (name, status) in [
            ("ok", 200),
            ("created", 201),
            ("badRequest", 400),
            ("unauthorized", 401),
            ("forbidden", 403),
            ("notFound", 404),
            ("conflict", 409),
            ("serverError", 500),
        ] {
            assert!(
                body.contains(&format!("export const {} =", name)),
                "missing constructor {}",
                name
            );
            assert!(body.contains(&format!("respond({}", status)));
        }
    }

    #[test]
    fn test_detail_route_rejects_blank_ids() {
        let body = Template::DetailRoute.body();
        assert!(body.contains("id.trim()"));
        assert!(body.contains("badRequest(\"id is required\")"));
    }

    #[test]
    fn test_service_numbers_match_native_store() {
        let body = Template::Service.body();
        // Age filter and insert coercion both require a finite number
        assert!(body.contains("if (Number.isFinite(age)) {"));
        assert!(body.contains("age: Number.isFinite(age) ? age : 0,"));
        assert!(!body.contains("Math.trunc"));
    }

    #[test]
    fn test_routes_reject_non_object_bodies() {
        for template in [Template::ListRoute, Template::DetailRoute] {
            assert!(template
                .body()
                .contains("badRequest(\"Request body must be a JSON object\")"));
        }
    }
}
