use crate::error::{FrameworkError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Thread-safe service container.
///
/// Bindings are keyed by the requested type, which may be a trait object such as
/// `dyn ExceptionHandler`. Each binding is a shared singleton: every `resolve`
/// hands out a clone of the same `Arc`.
pub struct Container {
    services: DashMap<TypeId, ServiceEntry>,
}

impl Clone for Container {
    fn clone(&self) -> Self {
        Self {
            services: self.services.clone(),
        }
    }
}

#[derive(Clone)]
struct ServiceEntry {
    // Always an `Arc<T>` boxed behind `dyn Any`, so unsized `T` can be stored too.
    instance: Arc<dyn Any + Send + Sync>,
}

impl ServiceEntry {
    fn new<T: ?Sized + 'static + Send + Sync>(instance: Arc<T>) -> Self {
        Self {
            instance: Arc::new(instance),
        }
    }

    fn downcast<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let wrapper = self
            .instance
            .clone()
            .downcast::<Arc<T>>()
            .map_err(|_| FrameworkError::downcast_failed::<T>())?;
        // The result of downcast is Arc<Arc<T>>, so we clone the inner Arc.
        Ok(wrapper.as_ref().clone())
    }
}

impl Container {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// Register an owned service instance
    pub fn register<T: 'static + Send + Sync>(&self, instance: T) -> &Self {
        self.instance(Arc::new(instance))
    }

    /// Bind a shared instance, replacing any previous binding for `T`
    pub fn instance<T: ?Sized + 'static + Send + Sync>(&self, instance: Arc<T>) -> &Self {
        self.services
            .insert(TypeId::of::<T>(), ServiceEntry::new(instance));
        self
    }

    pub fn resolve<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(&TypeId::of::<T>())
            .ok_or_else(FrameworkError::not_found::<T>)?;
        entry.value().downcast::<T>()
    }

    /// Resolve `T`, binding the instance produced by `init` first if nothing is bound yet
    pub fn resolve_or_insert_with<T, F>(&self, init: F) -> Arc<T>
    where
        T: ?Sized + 'static + Send + Sync,
        F: FnOnce() -> Arc<T>,
    {
        let entry = self
            .services
            .entry(TypeId::of::<T>())
            .or_insert_with(|| ServiceEntry::new(init()));
        entry
            .value()
            .downcast::<T>()
            .expect("Binding stored under a mismatched type id. This is a bug in meshestra-exceptions.")
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Drop every binding
    pub fn flush(&self) {
        self.services.clear();
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestService {
        value: i32,
    }

    trait MyTrait: Send + Sync {
        fn get_value(&self) -> i32;
    }

    struct MyTraitImpl {
        value: i32,
    }

    impl MyTrait for MyTraitImpl {
        fn get_value(&self) -> i32 {
            self.value
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let container = Container::new();
        container.register(TestService { value: 42 });
        let service = container.resolve::<TestService>().unwrap();
        assert_eq!(service.value, 42);
    }

    #[test]
    fn test_instance_and_resolve_trait_object() {
        let container = Container::new();
        container.instance::<dyn MyTrait>(Arc::new(MyTraitImpl { value: 99 }));
        let trait_instance = container.resolve::<dyn MyTrait>().unwrap();
        assert_eq!(trait_instance.get_value(), 99);
    }

    #[test]
    fn test_instance_is_a_shared_singleton() {
        let container = Container::new();
        let bound: Arc<dyn MyTrait> = Arc::new(MyTraitImpl { value: 1 });
        container.instance(Arc::clone(&bound));

        let first = container.resolve::<dyn MyTrait>().unwrap();
        let second = container.resolve::<dyn MyTrait>().unwrap();
        assert!(Arc::ptr_eq(&first, &bound));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_instance_replaces_previous_binding() {
        let container = Container::new();
        container.instance::<dyn MyTrait>(Arc::new(MyTraitImpl { value: 1 }));
        container.instance::<dyn MyTrait>(Arc::new(MyTraitImpl { value: 2 }));
        assert_eq!(container.resolve::<dyn MyTrait>().unwrap().get_value(), 2);
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_resolve_missing_binding() {
        let container = Container::new();
        let err = container.resolve::<TestService>().err().unwrap();
        assert!(matches!(err, FrameworkError::DependencyNotFound { .. }));
    }

    #[test]
    fn test_resolve_or_insert_with_only_initializes_once() {
        let container = Container::new();
        let first =
            container.resolve_or_insert_with::<dyn MyTrait, _>(|| Arc::new(MyTraitImpl { value: 7 }));
        let second = container
            .resolve_or_insert_with::<dyn MyTrait, _>(|| panic!("binding should already exist"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.get_value(), 7);
    }

    #[test]
    fn test_flush() {
        let container = Container::new();
        container.register(TestService { value: 1 });
        assert!(container.contains::<TestService>());
        container.flush();
        assert!(container.is_empty());
    }
}
