//! # Wound Assessment Engine
//!
//! Turns a wound photograph into a structured assessment, diffs two
//! assessments of the same wound into a healing trend, and generates
//! prioritized care instructions.
//!
//! ## Core Features
//!
//! - **Pixel Classification**: Colour-threshold wound mask and tissue categories behind the [`PixelClassifier`] trait
//! - **Region Geometry**: Bounding box, 4-neighbour perimeter, edge definition and a simplified outline
//! - **Clinical Rules**: Ordered first-match rules for healing stage and risk level
//! - **Temporal Comparison**: Weighted improvement score, trend and healing rate
//! - **Care Recommendations**: Template-driven, priority-sorted instructions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wound::AssessmentPipeline;
//! use image::open;
//!
//! let pipeline = AssessmentPipeline::builder().build();
//!
//! let image = open("wound.jpg")?.to_rgb8();
//! let record = pipeline.analyze(&image);
//! println!("{} / {}", record.healing_stage, record.risk_level);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Comparing Scans
//!
//! ```rust,no_run
//! use wound::{AssessmentPipeline, Comparator, recommendations, PatientAnswers};
//!
//! let pipeline = AssessmentPipeline::default();
//! let previous = pipeline.analyze(&image::open("day1.jpg")?.to_rgb8());
//! let current = pipeline.analyze(&image::open("day4.jpg")?.to_rgb8());
//!
//! let comparison = Comparator::default().compare(&current, &previous, 3);
//! let care = recommendations::generate(&current, &PatientAnswers::default(), None);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod comparison;
pub mod recommendations;
pub mod enrichment;
pub mod manager;
pub mod mcp;

pub use error::{WoundError, Result};
pub use types::*;
pub use config::EngineConfig;
pub use traits::*;
pub use algorithms::{HeuristicPixelClassifier, NoJitter, RandomJitter};
pub use pipeline::{AnalysisOutcome, AssessmentPipeline, FallbackReason, builder::PipelineBuilder};
pub use comparison::{Comparator, ComparisonRecord, Trend};
pub use recommendations::{CareCategory, CarePriority, CareRecommendation};
pub use enrichment::{RemoteClassification, RemoteRecommendation};
pub use manager::{AssessmentCommand, AssessmentManager, CommandOutcome};
