use slumber::{
    Bean, Catalog, Component, Config, Container, ContainerErrorKind, DFSErrorKind, Initializable, InjectErrorKind, Instance,
    Interceptor, NameAware, PostProcessor, ResolveErrorKind, Scope, ScanErrorKind, Stage, Trace,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

const SERVICE: &str = concat!(module_path!(), "::service");
const CYCLE: &str = concat!(module_path!(), "::cycle");
const EMPTY: &str = concat!(module_path!(), "::empty");
const INTERCEPTED: &str = concat!(module_path!(), "::intercepted");
const UNDECORATED: &str = concat!(module_path!(), "::undecorated");

mod service {
    use super::*;

    pub trait UserInterface: Send + Sync {
        fn test(&self) -> Option<&str>;

        fn bean_name(&self) -> &str;
    }

    pub trait OrderInterface: Send + Sync {
        fn id(&self) -> usize;
    }

    pub static ORDERS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Component)]
    #[component("orderService")]
    #[component(expose(dyn OrderInterface))]
    #[scope("prototype")]
    pub struct OrderService {
        id: usize,
    }

    impl Default for OrderService {
        fn default() -> Self {
            Self {
                id: ORDERS.fetch_add(1, Ordering::SeqCst),
            }
        }
    }

    impl OrderInterface for OrderService {
        fn id(&self) -> usize {
            self.id
        }
    }

    #[derive(Component, Default)]
    #[component("userService", name_aware, initializable, expose(dyn UserInterface))]
    pub struct UserService {
        #[autowired("orderService")]
        pub order_service: Option<Arc<dyn OrderInterface>>,
        #[autowired]
        pub repository: Option<Bean>,
        pub name: String,
        pub initialized_with: Option<usize>,
    }

    impl NameAware for UserService {
        fn set_bean_name(&mut self, name: &str) {
            self.name = name.to_owned();
        }
    }

    impl Initializable for UserService {
        fn after_properties_set(&mut self) -> anyhow::Result<()> {
            self.initialized_with = self.order_service.as_ref().map(|order_service| order_service.id());
            Ok(())
        }
    }

    impl UserInterface for UserService {
        fn test(&self) -> Option<&str> {
            self.repository.as_ref().map(Bean::name)
        }

        fn bean_name(&self) -> &str {
            &self.name
        }
    }

    #[derive(Component)]
    #[component(name = "repository", constructor = Repository::open)]
    pub struct Repository {
        pub url: &'static str,
    }

    impl Repository {
        fn open() -> anyhow::Result<Self> {
            Ok(Self { url: "memory://" })
        }
    }

    #[derive(Component, Default)]
    pub struct NotAComponent;
}

mod cycle {
    use super::*;

    #[derive(Component, Default)]
    #[component("a")]
    pub struct A {
        #[autowired("b")]
        pub b: Option<Bean>,
    }

    #[derive(Component, Default)]
    #[component("b")]
    pub struct B {
        #[autowired("a")]
        pub a: Option<Bean>,
    }

    #[derive(Component, Default)]
    #[component("c")]
    pub struct C;
}

mod empty {
    use super::*;

    #[derive(Component, Default)]
    pub struct Unmarked;
}

mod intercepted {
    use super::*;

    pub trait Greeter: Send + Sync {
        fn greet(&self, name: &str) -> String;
    }

    #[derive(Component, Default)]
    #[component("greeter", expose(dyn Greeter))]
    pub struct English;

    impl Greeter for English {
        fn greet(&self, name: &str) -> String {
            format!("Hello, {name}")
        }
    }

    pub struct TracedGreeter {
        inner: Arc<dyn Greeter>,
        trace: Trace,
    }

    impl TracedGreeter {
        pub fn new(inner: Arc<dyn Greeter>, trace: Trace) -> Self {
            Self { inner, trace }
        }
    }

    impl Greeter for TracedGreeter {
        fn greet(&self, name: &str) -> String {
            self.trace.enter("greet");
            self.inner.greet(name)
        }
    }

    #[derive(Component)]
    #[component("tracing", post_processor)]
    pub struct Tracing {
        interceptor: Interceptor,
    }

    impl Default for Tracing {
        fn default() -> Self {
            Self {
                interceptor: Interceptor::new("greeter")
                    .decorate::<dyn Greeter, _>(|inner, trace| Arc::new(TracedGreeter::new(inner, trace)) as Arc<dyn Greeter>),
            }
        }
    }

    impl PostProcessor for Tracing {
        fn after_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
            self.interceptor.after_initialization(instance, name)
        }
    }
}

mod undecorated {
    use super::*;

    pub trait Counter: Send + Sync {
        fn count(&self) -> usize;
    }

    #[derive(Component, Default)]
    #[component("greeter", expose(dyn intercepted::Greeter, dyn Counter))]
    pub struct Counting;

    impl intercepted::Greeter for Counting {
        fn greet(&self, name: &str) -> String {
            format!("Hi, {name}")
        }
    }

    impl Counter for Counting {
        fn count(&self) -> usize {
            3
        }
    }

    #[derive(Component)]
    #[component("tracing", post_processor)]
    pub struct Tracing {
        interceptor: Interceptor,
    }

    impl Default for Tracing {
        fn default() -> Self {
            Self {
                interceptor: Interceptor::new("greeter").decorate::<dyn intercepted::Greeter, _>(|inner, trace| {
                    Arc::new(intercepted::TracedGreeter::new(inner, trace)) as Arc<dyn intercepted::Greeter>
                }),
            }
        }
    }

    impl PostProcessor for Tracing {
        fn after_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
            self.interceptor.after_initialization(instance, name)
        }
    }
}

use service::{OrderInterface, UserInterface, UserService};

#[test]
fn test_linked_catalog() {
    let catalog = Catalog::linked();

    let units = catalog.resolve(SERVICE).unwrap();
    assert_eq!(units.len(), 4);
    assert!(units.iter().any(|unit| unit.component_name().is_none()));
    assert!(catalog.resolve(module_path!()).unwrap().is_empty());
    assert!(catalog.resolve(concat!(module_path!(), "::missing")).is_none());
}

#[test]
fn test_singleton_identity() {
    let container = Container::new(Config::new(SERVICE)).unwrap();

    let first = container.get_bean("userService").unwrap();
    let second = container.get_bean("userService").unwrap();
    assert!(Bean::ptr_eq(&first, &second));
    assert_eq!(container.descriptor("userService").unwrap().scope(), Scope::Singleton);
}

#[test]
fn test_prototype_distinct() {
    let container = Container::new(Config::new(SERVICE)).unwrap();

    let first = container.get::<dyn OrderInterface>("orderService").unwrap();
    let second = container.get::<dyn OrderInterface>("orderService").unwrap();
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_injection_and_callbacks() {
    let container = Container::new(Config::new(SERVICE)).unwrap();

    let user_service = container.get_bean("userService").unwrap();
    let user_service = user_service.downcast_ref::<UserService>().unwrap();

    assert_eq!(user_service.name, "userService");
    assert!(user_service.order_service.is_some());
    assert_eq!(
        user_service.initialized_with,
        user_service.order_service.as_ref().map(|order_service| order_service.id())
    );

    let user_interface = container.get::<dyn UserInterface>("userService").unwrap();
    assert_eq!(user_interface.test(), Some("repository"));
    assert_eq!(user_interface.bean_name(), "userService");

    let repository = container.get_bean("repository").unwrap();
    assert_eq!(repository.downcast_ref::<service::Repository>().unwrap().url, "memory://");
}

#[test]
fn test_no_such_component() {
    let container = Container::new(Config::new(SERVICE)).unwrap();

    assert!(matches!(
        container.get_bean("doesNotExist"),
        Err(ResolveErrorKind::NoSuchComponent { name }) if name == "doesNotExist"
    ));
    assert!(!container.contains("notAComponent"));
}

#[test]
fn test_empty_namespace() {
    let container = Container::new(Config::new(EMPTY)).unwrap();

    assert!(container.is_empty());
    assert!(matches!(
        container.get_bean("userService"),
        Err(ResolveErrorKind::NoSuchComponent { .. })
    ));
}

#[test]
fn test_namespace_not_found() {
    assert!(matches!(
        Container::new(Config::new("nowhere")),
        Err(ContainerErrorKind::Scan(ScanErrorKind::NamespaceNotFound { .. }))
    ));
}

#[test]
fn test_cycle() {
    assert!(matches!(
        Container::new(Config::new(CYCLE)),
        Err(ContainerErrorKind::Cycle(DFSErrorKind::CyclicDependency { .. }))
    ));

    let container = Container::new(Config::new(CYCLE).wire("b", "a", "c")).unwrap();
    let a = container.get_bean("a").unwrap();
    let b = a.downcast_ref::<cycle::A>().unwrap().b.as_ref().unwrap();
    assert!(b.downcast_ref::<cycle::B>().unwrap().a.as_ref().unwrap().is::<cycle::C>());
}

#[test]
fn test_wiring_incorrect_type() {
    let result = Container::new(Config::new(SERVICE).wire("userService", "order_service", "repository"));

    assert!(matches!(
        result,
        Err(ContainerErrorKind::Resolve(ResolveErrorKind::Inject {
            kind: InjectErrorKind::IncorrectType { .. },
            ..
        }))
    ));
}

#[test]
fn test_interception() {
    let container = Container::new(Config::new(INTERCEPTED)).unwrap();

    let greeter = container.get_bean("greeter").unwrap();
    assert!(greeter.downcast_ref::<intercepted::English>().is_none());
    assert!(!container.contains("tracing"));

    let greeter = container.get::<dyn intercepted::Greeter>("greeter").unwrap();
    assert_eq!(greeter.greet("world"), "Hello, world");
}

#[test]
fn test_interception_requires_every_decorator() {
    let result = Container::new(Config::new(UNDECORATED));

    assert!(matches!(
        result,
        Err(ContainerErrorKind::Resolve(ResolveErrorKind::PostProcess {
            name,
            stage: Stage::AfterInitialization,
            ..
        })) if name == "greeter"
    ));
}
