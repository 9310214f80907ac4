//! Logging facade
//!
//! Forwards to `defmt` when the `defmt` feature is enabled, otherwise the
//! macros evaluate their arguments and do nothing. Arguments must be
//! `Copy` (integers, `&str`) so the no-op arm never moves a value.

#[cfg(feature = "defmt")]
pub use defmt;

#[cfg(feature = "defmt")]
mod backend {
    #[macro_export]
    macro_rules! __trace {
        ($($arg:tt)*) => {{
            use $crate::log::defmt;
            defmt::trace!($($arg)*);
        }};
    }

    #[macro_export]
    macro_rules! __debug {
        ($($arg:tt)*) => {{
            use $crate::log::defmt;
            defmt::debug!($($arg)*);
        }};
    }

    #[macro_export]
    macro_rules! __info {
        ($($arg:tt)*) => {{
            use $crate::log::defmt;
            defmt::info!($($arg)*);
        }};
    }

    #[macro_export]
    macro_rules! __warn {
        ($($arg:tt)*) => {{
            use $crate::log::defmt;
            defmt::warn!($($arg)*);
        }};
    }

    #[macro_export]
    macro_rules! __error {
        ($($arg:tt)*) => {{
            use $crate::log::defmt;
            defmt::error!($($arg)*);
        }};
    }
}

#[cfg(feature = "defmt")]
pub use crate::{
    __debug as debug, __error as error, __info as info, __trace as trace, __warn as warn,
};

#[cfg(not(feature = "defmt"))]
mod backend {
    #[macro_export]
    macro_rules! __stub {
        ($($arg:tt)*) => {{
            let _ = ($($arg)*); // Do nothing
        }};
    }
}

#[cfg(not(feature = "defmt"))]
pub use crate::{
    __stub as debug, __stub as error, __stub as info, __stub as trace, __stub as warn,
};
