use alloc::{borrow::ToOwned as _, boxed::Box};
use tracing::{debug, error, info_span};

use crate::{
    bean::Bean,
    component::Instance,
    container::Container,
    errors::{InstantiateErrorKind, ResolveErrorKind},
    post_processor::Stage,
    registry::ComponentDescriptor,
};

/// Builds a component from its descriptor.
///
/// Steps run strictly in order: instantiate, inject dependencies, name-aware callback,
/// before-initialization hooks, initialization, after-initialization hooks.
pub(crate) fn create_bean(container: &Container, descriptor: &ComponentDescriptor) -> Result<Bean, ResolveErrorKind> {
    let name = descriptor.name();
    let span = info_span!("create_bean", name, scope = descriptor.scope().name());
    let _guard = span.enter();

    let mut instance = instantiate(descriptor)?;
    debug!("Instantiated");

    for slot in descriptor.dependencies() {
        let bean = container.get_bean(&slot.target).map_err(|err| {
            let err = ResolveErrorKind::Dependency {
                name: name.to_owned(),
                field: slot.field,
                err: Box::new(err),
            };
            error!("{}", err);
            err
        })?;

        instance.inject(slot.field, bean).map_err(|kind| {
            let err = ResolveErrorKind::Inject {
                name: name.to_owned(),
                kind,
            };
            error!("{}", err);
            err
        })?;
        debug!(field = slot.field, target = slot.target.as_str(), "Injected");
    }

    if let Some(name_aware) = instance.as_name_aware() {
        name_aware.set_bean_name(name);
        debug!("Bean name set");
    }

    instance = post_process(container, instance, name, Stage::BeforeInitialization)?;

    if let Some(initializable) = instance.as_initializable() {
        if let Err(err) = initializable.after_properties_set() {
            let err = ResolveErrorKind::Initialization {
                name: name.to_owned(),
                err,
            };
            error!("{}", err);
            return Err(err);
        }
        debug!("Initialized");
    }

    instance = post_process(container, instance, name, Stage::AfterInitialization)?;

    Ok(Bean::new(name, instance))
}

fn instantiate(descriptor: &ComponentDescriptor) -> Result<Instance, ResolveErrorKind> {
    let type_name = descriptor.type_info().name;

    let result = match descriptor.constructor() {
        Some(constructor) => constructor().map_err(|err| InstantiateErrorKind::Constructor { type_name, err }),
        None => Err(InstantiateErrorKind::NoConstructor { type_name }),
    };

    result.map_err(|kind| {
        let err = ResolveErrorKind::Instantiate {
            name: descriptor.name().to_owned(),
            kind,
        };
        error!("{}", err);
        err
    })
}

fn post_process(container: &Container, mut instance: Instance, name: &str, stage: Stage) -> Result<Instance, ResolveErrorKind> {
    for post_processor in container.post_processors() {
        let result = match stage {
            Stage::BeforeInitialization => post_processor.before_initialization(instance, name),
            Stage::AfterInitialization => post_processor.after_initialization(instance, name),
        };

        instance = result.map_err(|err| {
            let err = ResolveErrorKind::PostProcess {
                name: name.to_owned(),
                stage,
                err,
            };
            error!("{}", err);
            err
        })?;
    }
    debug!(%stage, "Post-processed");

    Ok(instance)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::{
        catalog::Catalog,
        component::{Component, Initializable, Instance, NameAware},
        config::Config,
        container::Container,
        errors::{ContainerErrorKind, InjectErrorKind, InstantiateErrorKind, ResolveErrorKind},
        post_processor::{PostProcessor, Stage},
        unit::Unit,
        Bean,
    };

    use alloc::{
        borrow::ToOwned as _,
        boxed::Box,
        format,
        string::{String, ToString as _},
        vec::Vec,
    };
    use std::sync::Mutex;
    use tracing_test::traced_test;

    static EVENTS: Mutex<Vec<String>> = Mutex::new(Vec::new());

    fn record(event: &str) {
        EVENTS.lock().unwrap().push(event.to_owned());
    }

    fn take_events() -> Vec<String> {
        core::mem::take(&mut *EVENTS.lock().unwrap())
    }

    #[derive(Default)]
    struct Repository;

    impl Component for Repository {}

    #[derive(Default)]
    struct Service {
        repository: Option<Bean>,
        name: String,
        initialized_with_repository: bool,
    }

    impl NameAware for Service {
        fn set_bean_name(&mut self, name: &str) {
            record("set_bean_name");
            self.name = name.to_owned();
        }
    }

    impl Initializable for Service {
        fn after_properties_set(&mut self) -> anyhow::Result<()> {
            record("after_properties_set");
            self.initialized_with_repository = self.repository.is_some();
            Ok(())
        }
    }

    impl Component for Service {
        fn inject(&mut self, field: &str, bean: Bean) -> Result<(), InjectErrorKind> {
            match field {
                "repository" => {
                    record("inject");
                    self.repository = Some(bean);
                    Ok(())
                }
                _ => Err(InjectErrorKind::UnknownField { field: field.to_owned() }),
            }
        }

        fn as_name_aware(&mut self) -> Option<&mut dyn NameAware> {
            Some(self)
        }

        fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
            Some(self)
        }
    }

    #[derive(Default)]
    struct First;

    impl PostProcessor for First {
        fn before_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
            record(&format!("first before {name}"));
            Ok(instance)
        }

        fn after_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
            record(&format!("first after {name}"));
            Ok(instance)
        }
    }

    #[derive(Default)]
    struct Second;

    impl PostProcessor for Second {
        fn before_initialization(&self, mut instance: Instance, name: &str) -> anyhow::Result<Instance> {
            record(&format!("second before {name}"));
            if let Some(service) = instance.downcast_mut::<Service>() {
                service.name = "renamed".to_owned();
            }
            Ok(instance)
        }

        fn after_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
            record(&format!("second after {name}"));
            Ok(instance)
        }
    }

    struct Failing;

    impl PostProcessor for Failing {
        fn after_initialization(&self, _instance: Instance, _name: &str) -> anyhow::Result<Instance> {
            Err(anyhow::anyhow!("rejected"))
        }
    }

    #[derive(Default)]
    struct Broken;

    impl Initializable for Broken {
        fn after_properties_set(&mut self) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("broken"))
        }
    }

    impl Component for Broken {
        fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
            Some(self)
        }
    }

    fn repository() -> anyhow::Result<Instance> {
        Ok(Box::new(Repository))
    }

    fn service() -> anyhow::Result<Instance> {
        Ok(Box::new(Service::default()))
    }

    fn broken() -> anyhow::Result<Instance> {
        Ok(Box::new(Broken))
    }

    fn failing_constructor() -> anyhow::Result<Instance> {
        Err(anyhow::anyhow!("out of memory"))
    }

    fn first() -> anyhow::Result<Box<dyn PostProcessor>> {
        Ok(Box::new(First))
    }

    fn second() -> anyhow::Result<Box<dyn PostProcessor>> {
        Ok(Box::new(Second))
    }

    fn failing() -> anyhow::Result<Box<dyn PostProcessor>> {
        Ok(Box::new(Failing))
    }

    // Prototypes keep the eager build from recording events before the test asks for them
    fn catalog() -> Catalog {
        Catalog::new()
            .with_unit(
                Unit::new::<Repository>("lifecycle")
                    .component("repository")
                    .scope("prototype")
                    .constructor(repository),
            )
            .with_unit(
                Unit::new::<Service>("lifecycle")
                    .component("service")
                    .scope("prototype")
                    .autowired("repository", "repository")
                    .constructor(service),
            )
            .with_unit(Unit::new::<First>("lifecycle").component("first").post_processor(first))
            .with_unit(Unit::new::<Second>("lifecycle").component("second").post_processor(second))
    }

    #[test]
    #[traced_test]
    fn test_lifecycle_order() {
        let container = Container::with_catalog(&catalog(), Config::new("lifecycle")).unwrap();
        take_events();

        let bean = container.get_bean("service").unwrap();
        let service = bean.downcast_ref::<Service>().unwrap();

        assert_eq!(service.name, "renamed");
        assert!(service.initialized_with_repository);
        assert!(service.repository.as_ref().unwrap().is::<Repository>());

        let events = take_events();
        assert_eq!(
            events,
            [
                "first before repository",
                "second before repository",
                "first after repository",
                "second after repository",
                "inject",
                "set_bean_name",
                "first before service",
                "second before service",
                "after_properties_set",
                "first after service",
                "second after service",
            ]
        );
    }

    #[test]
    #[traced_test]
    fn test_no_constructor() {
        let catalog = Catalog::new().with_unit(Unit::new::<Repository>("lifecycle").component("repository").scope("prototype"));
        let container = Container::with_catalog(&catalog, Config::new("lifecycle")).unwrap();

        assert!(matches!(
            container.get_bean("repository"),
            Err(ResolveErrorKind::Instantiate {
                kind: InstantiateErrorKind::NoConstructor { .. },
                ..
            })
        ));
    }

    #[test]
    #[traced_test]
    fn test_constructor_failed() {
        let catalog = Catalog::new().with_unit(
            Unit::new::<Repository>("lifecycle")
                .component("repository")
                .constructor(failing_constructor),
        );

        assert!(matches!(
            Container::with_catalog(&catalog, Config::new("lifecycle")),
            Err(ContainerErrorKind::Resolve(ResolveErrorKind::Instantiate {
                kind: InstantiateErrorKind::Constructor { .. },
                ..
            }))
        ));
    }

    #[test]
    #[traced_test]
    fn test_missing_dependency() {
        let catalog = Catalog::new().with_unit(
            Unit::new::<Service>("lifecycle")
                .component("service")
                .scope("prototype")
                .autowired("repository", "repository")
                .constructor(service),
        );
        let container = Container::with_catalog(&catalog, Config::new("lifecycle")).unwrap();

        let Err(ResolveErrorKind::Dependency { name, field, err }) = container.get_bean("service") else {
            panic!("dependency error expected");
        };
        assert_eq!(name, "service");
        assert_eq!(field, "repository");
        assert!(matches!(&*err, ResolveErrorKind::NoSuchComponent { name } if name == "repository"));
        assert!(logs_contain("Dependency `repository` of component `service` can't be resolved"));
    }

    #[test]
    #[traced_test]
    fn test_unknown_field() {
        let catalog = Catalog::new()
            .with_unit(Unit::new::<Repository>("lifecycle").component("repository").constructor(repository))
            .with_unit(
                Unit::new::<Repository>("lifecycle")
                    .component("other")
                    .scope("prototype")
                    .autowired("repository", "repository")
                    .constructor(repository),
            );
        let container = Container::with_catalog(&catalog, Config::new("lifecycle")).unwrap();

        assert!(matches!(
            container.get_bean("other"),
            Err(ResolveErrorKind::Inject {
                kind: InjectErrorKind::UnknownField { .. },
                ..
            })
        ));
    }

    #[test]
    #[traced_test]
    fn test_initialization_failed() {
        let catalog = Catalog::new().with_unit(
            Unit::new::<Broken>("lifecycle")
                .component("broken")
                .scope("prototype")
                .constructor(broken),
        );
        let container = Container::with_catalog(&catalog, Config::new("lifecycle")).unwrap();

        let Err(err) = container.get_bean("broken") else {
            panic!("initialization error expected");
        };
        assert!(matches!(err, ResolveErrorKind::Initialization { .. }));
        assert_eq!(err.to_string(), "Initialization of component `broken` failed: broken");
    }

    #[test]
    #[traced_test]
    fn test_post_process_failed() {
        let catalog = Catalog::new()
            .with_unit(
                Unit::new::<Repository>("lifecycle")
                    .component("repository")
                    .scope("prototype")
                    .constructor(repository),
            )
            .with_unit(Unit::new::<Failing>("lifecycle").component("failing").post_processor(failing));
        let container = Container::with_catalog(&catalog, Config::new("lifecycle")).unwrap();

        assert!(matches!(
            container.get_bean("repository"),
            Err(ResolveErrorKind::PostProcess {
                stage: Stage::AfterInitialization,
                ..
            })
        ));
        assert!(logs_contain("After-initialization post-processing of component `repository` failed: rejected"));
    }
}
