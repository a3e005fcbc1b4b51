//! Declarative wiring of the application's feature modules

use crate::{prelude::HashSet, MapError, Result};

/// A named module and the modules it depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppModule {
    pub name: &'static str,
    /// Feature modules and libraries
    pub requires: Vec<&'static str>,
    /// Child route modules
    pub children: Vec<&'static str>,
}

impl AppModule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            requires: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn requires(mut self, modules: &[&'static str]) -> Self {
        self.requires.extend_from_slice(modules);
        self
    }

    pub fn children(mut self, modules: &[&'static str]) -> Self {
        self.children.extend_from_slice(modules);
        self
    }

    /// The application's root module
    pub fn root() -> Self {
        Self::new("app.root")
            .requires(&[
                "app.login",
                "app.map",
                "app.messageBoard",
                "app.user",
                "ui.router",
            ])
            .children(&[
                "app.create",
                "app.detail",
                "app.landing",
                "app.search",
                "app.user",
            ])
    }

    /// All dependencies in declaration order, each listed once
    pub fn dependencies(&self) -> Vec<&'static str> {
        let mut seen = HashSet::default();
        self.requires
            .iter()
            .chain(self.children.iter())
            .copied()
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Registered module names
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    registered: HashSet<&'static str>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a module as available; registering twice is a no-op
    pub fn register(&mut self, name: &'static str) {
        if !self.registered.insert(name) {
            log::debug!("module '{}' already registered", name);
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    /// Dependencies of `module` that have not been registered
    pub fn missing_dependencies(&self, module: &AppModule) -> Vec<&'static str> {
        module
            .dependencies()
            .into_iter()
            .filter(|name| !self.is_registered(name))
            .collect()
    }

    /// Registers `module` once all its dependencies are available
    pub fn bootstrap(&mut self, module: &AppModule) -> Result<()> {
        let missing = self.missing_dependencies(module);
        if !missing.is_empty() {
            return Err(MapError::Composition(format!(
                "module '{}' is missing {}",
                module.name,
                missing.join(", ")
            )));
        }
        self.register(module.name);
        log::info!("module '{}' bootstrapped", module.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_dependencies_in_order() {
        let root = AppModule::root();
        assert_eq!(
            root.dependencies(),
            vec![
                "app.login",
                "app.map",
                "app.messageBoard",
                "app.user",
                "ui.router",
                "app.create",
                "app.detail",
                "app.landing",
                "app.search",
            ]
        );
    }

    #[test]
    fn test_bootstrap_reports_missing_modules() {
        let root = AppModule::root();
        let mut registry = ModuleRegistry::new();
        for name in ["app.login", "app.map", "app.user", "ui.router"] {
            registry.register(name);
        }

        let err = registry.bootstrap(&root).unwrap_err();
        assert!(err.to_string().contains("app.messageBoard"));
        assert!(!registry.is_registered("app.root"));

        for name in root.dependencies() {
            registry.register(name);
        }
        registry.bootstrap(&root).unwrap();
        assert!(registry.is_registered("app.root"));
        assert!(registry.missing_dependencies(&root).is_empty());
    }
}
