use axum::http::Method;

use crate::reference::Reference;

/// What a request asks for, decided from its method and path alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Homepage,
    /// `None` when the path is too short to contain a reference.
    Read(Option<Reference>),
    Create,
    Unsupported(Method),
}

impl Route {
    pub fn classify(method: &Method, path: &str) -> Self {
        match *method {
            Method::GET if path == "/" => Route::Homepage,
            Method::GET => Route::Read(Reference::from_path(path)),
            Method::POST => Route::Create,
            _ => Route::Unsupported(method.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_root_is_homepage() {
        assert_eq!(Route::classify(&Method::GET, "/"), Route::Homepage);
        assert_eq!(Route::classify(&Method::GET, "/x"), Route::Read(None));
        assert_ne!(Route::classify(&Method::GET, "/index.html"), Route::Homepage);
    }

    #[test]
    fn get_reads_positional_reference() {
        assert_eq!(
            Route::classify(&Method::GET, "/Kq5sNanything"),
            Route::Read(Some(Reference::derive("hello world")))
        );
    }

    #[test]
    fn post_creates_on_any_path() {
        for path in ["/", "/whatever", "/a/b/c"] {
            assert_eq!(Route::classify(&Method::POST, path), Route::Create);
        }
    }

    #[test]
    fn other_methods_are_unsupported() {
        for method in [Method::DELETE, Method::PUT, Method::PATCH, Method::HEAD] {
            assert_eq!(
                Route::classify(&method, "/abcde"),
                Route::Unsupported(method.clone())
            );
        }
    }
}
