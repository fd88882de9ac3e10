mod binned_data;
pub use binned_data::BinnedData;

mod binned_median;
pub use binned_median::BinnedMedian;
