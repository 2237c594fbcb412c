use slumber::{Bean, Component, Initializable, Instance, Interceptor, NameAware, PostProcessor, Trace};
use std::sync::Arc;
use tracing::info;

pub trait UserInterface: Send + Sync {
    fn test(&self);
}

#[derive(Component, Default, Debug)]
#[component("orderService")]
pub struct OrderService;

#[derive(Component, Default)]
#[component("userService", name_aware, initializable, expose(dyn UserInterface))]
pub struct UserService {
    #[autowired("orderService")]
    order_service: Option<Bean>,
    bean_name: String,
}

impl NameAware for UserService {
    fn set_bean_name(&mut self, name: &str) {
        self.bean_name = name.to_owned();
    }
}

impl Initializable for UserService {
    fn after_properties_set(&mut self) -> anyhow::Result<()> {
        info!(bean_name = self.bean_name.as_str(), "Initialization");
        Ok(())
    }
}

impl UserInterface for UserService {
    fn test(&self) {
        println!("{:?}", self.order_service);
    }
}

struct TracedUserInterface {
    inner: Arc<dyn UserInterface>,
    trace: Trace,
}

impl UserInterface for TracedUserInterface {
    fn test(&self) {
        self.trace.enter("test");
        self.inner.test();
    }
}

#[derive(Component)]
#[component("sleepBeanPostProcessor", post_processor)]
pub struct SleepBeanPostProcessor {
    interceptor: Interceptor,
}

impl Default for SleepBeanPostProcessor {
    fn default() -> Self {
        Self {
            interceptor: Interceptor::new("userService").decorate::<dyn UserInterface, _>(|inner, trace| {
                Arc::new(TracedUserInterface { inner, trace }) as Arc<dyn UserInterface>
            }),
        }
    }
}

impl PostProcessor for SleepBeanPostProcessor {
    fn before_initialization(&self, mut instance: Instance, name: &str) -> anyhow::Result<Instance> {
        if let Some(user_service) = instance.downcast_mut::<UserService>() {
            info!(name, "Before initialization");
            user_service.set_bean_name("Sleeping is great");
        }
        Ok(instance)
    }

    fn after_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
        if name == self.interceptor.target() {
            info!(name, "After initialization");
        }
        self.interceptor.after_initialization(instance, name)
    }
}
