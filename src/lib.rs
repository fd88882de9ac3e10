#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod error;
pub use error::{Result, StatsError};

mod utils;
pub(crate) use utils::helper;
pub use utils::SlidingWindowBuffer;

mod running_mean_variance;
pub use running_mean_variance::RunningMeanVariance;

mod moving_average;
pub use moving_average::{EmptyWindow, MovingAverage};

mod binned;
pub use binned::{BinnedData, BinnedMedian};

pub mod simple;
