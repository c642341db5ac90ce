//! Statistical utilities for the Diamond analyses.
//!
//! This crate provides the small set of numerical tools the analyses need:
//!
//! - **Descriptive statistics**: min, quartiles, median, mean, max and sample variance
//! - **Percentiles**: Linearly interpolated quantiles of sorted data
//! - **Least squares**: Ordinary least squares via the normal equations
//! - **Rounding**: Fixed decimal-digit rounding for reported ratios
//!
//! # Modules
//!
//! - [`descriptive`]: Five-number-plus-mean summaries with sample variance
//! - [`percentiles`]: Percentile computation on sorted data
//! - [`least_squares`]: Normal-equation solver that reports singular systems
//! - [`rounding`]: Decimal rounding helpers
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use diamond_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.first_quartile, 2.0);
//! assert_eq!(stats.variance, Some(2.5));
//! ```
//!
//! ## Fitting a line
//!
//! ```
//! use diamond_stats::least_squares;
//!
//! let rows = [[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
//! let response = [1.0, 3.0, 5.0];
//! let beta = least_squares::fit(&rows, &response).unwrap();
//! assert!((beta[0] - 1.0).abs() < 1e-9);
//! assert!((beta[1] - 2.0).abs() < 1e-9);
//! ```

pub mod descriptive;
pub mod least_squares;
pub mod percentiles;
pub mod rounding;
