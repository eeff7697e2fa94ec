// Copyright (c) 2020-2026 Dropbox, Inc.

macro_rules! impl_client_config {
    ($self:ident) => {
        /// Set a root which all subsequent paths are evaluated relative to, or `None` to omit
        /// the `Dropbox-API-Path-Root` header and let the server use its default.
        ///
        /// See <https://www.dropbox.com/developers/reference/path-root-header-modes> for more
        /// information.
        pub fn set_path_root(&mut $self, path_root: Option<crate::common::PathRoot>) {
            $self.path_root = path_root;
        }

        /// Builder form of [`set_path_root`](Self::set_path_root).
        pub fn with_path_root(mut $self, path_root: crate::common::PathRoot) -> Self {
            $self.path_root = Some(path_root);
            $self
        }
    }
}
pub(crate) use impl_client_config;

macro_rules! impl_http_client_accessors {
    () => {
        fn token(&self) -> Option<&str> {
            Some(&self.token)
        }

        fn path_root(&self) -> Option<&crate::common::PathRoot> {
            self.path_root.as_ref()
        }
    }
}
pub(crate) use impl_http_client_accessors;
