use url::form_urlencoded;

/// Query parameters understood by the form-builder page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormBuilderQuery {
    /// `?id=` names a saved form to open.
    pub form_id: Option<String>,
    /// `?action=import` opens the workflow import dialog immediately.
    pub import_action: bool,
}

/// The application's pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    FormBuilder(FormBuilderQuery),
    SavedForms,
    Gallery,
    Settings,
    NotFound(String),
}

impl Route {
    /// Parses a path with an optional query string, e.g. `/form-builder?action=import`.
    pub fn parse(path_and_query: &str) -> Self {
        let (path, query) = path_and_query
            .split_once('?')
            .unwrap_or((path_and_query, ""));
        let path = path.trim_end_matches('/');

        match path {
            "" => Route::Dashboard,
            "/form-builder" => Route::FormBuilder(parse_builder_query(query)),
            "/saved-forms" => Route::SavedForms,
            "/gallery" => Route::Gallery,
            "/settings" => Route::Settings,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::FormBuilder(query) => {
                let mut serializer = form_urlencoded::Serializer::new(String::new());
                if let Some(id) = &query.form_id {
                    serializer.append_pair("id", id);
                }
                if query.import_action {
                    serializer.append_pair("action", "import");
                }
                let query = serializer.finish();
                if query.is_empty() {
                    "/form-builder".to_string()
                } else {
                    format!("/form-builder?{}", query)
                }
            }
            Route::SavedForms => "/saved-forms".to_string(),
            Route::Gallery => "/gallery".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

fn parse_builder_query(query: &str) -> FormBuilderQuery {
    let mut result = FormBuilderQuery::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "id" if !value.is_empty() => result.form_id = Some(value.into_owned()),
            "action" => result.import_action = value == "import",
            _ => {}
        }
    }
    result
}
