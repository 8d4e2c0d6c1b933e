pub mod recommendations;

pub use recommendations::{
    RecommendationParams, RecommendationStrategy, StrategyKind, StrategyRegistry,
};
