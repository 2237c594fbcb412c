//! Runtime support for code generated by `#[derive(Component)]`

use alloc::{borrow::ToOwned as _, boxed::Box};
use core::any::type_name;

use crate::{bean::Bean, component::Component, errors::InjectErrorKind, post_processor::PostProcessor, Instance};

pub use alloc::sync::Arc;

/// Field types an `#[autowired]` field can have
pub trait FromBean: Sized {
    fn from_bean(bean: Bean) -> Option<Self>;

    fn expected() -> &'static str;
}

impl FromBean for Option<Bean> {
    #[inline]
    fn from_bean(bean: Bean) -> Option<Self> {
        Some(Some(bean))
    }

    #[inline]
    fn expected() -> &'static str {
        type_name::<Bean>()
    }
}

impl<I> FromBean for Option<Arc<I>>
where
    I: ?Sized + Send + Sync + 'static,
{
    #[inline]
    fn from_bean(bean: Bean) -> Option<Self> {
        bean.interface::<I>().map(Some)
    }

    #[inline]
    fn expected() -> &'static str {
        type_name::<I>()
    }
}

#[doc(hidden)]
pub fn inject<T: FromBean>(slot: &mut T, field: &str, bean: Bean) -> Result<(), InjectErrorKind> {
    let actual = bean.type_info().name;
    match T::from_bean(bean) {
        Some(value) => {
            *slot = value;
            Ok(())
        }
        None => Err(InjectErrorKind::IncorrectType {
            field: field.to_owned(),
            expected: T::expected(),
            actual,
        }),
    }
}

#[doc(hidden)]
pub fn default_constructor<T: Component + Default>() -> anyhow::Result<Instance> {
    Ok(Box::new(T::default()))
}

#[doc(hidden)]
pub fn construct<T: Component>(constructor: fn() -> anyhow::Result<T>) -> anyhow::Result<Instance> {
    Ok(Box::new(constructor()?))
}

#[doc(hidden)]
pub fn default_post_processor<T: PostProcessor + Default>() -> anyhow::Result<Box<dyn PostProcessor>> {
    Ok(Box::new(T::default()))
}

#[doc(hidden)]
pub fn construct_post_processor<T: PostProcessor>(constructor: fn() -> anyhow::Result<T>) -> anyhow::Result<Box<dyn PostProcessor>> {
    Ok(Box::new(constructor()?))
}
