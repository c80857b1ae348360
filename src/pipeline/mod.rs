pub mod stage2_pivot;
pub mod stage3_population;
pub mod stage4_reference;
pub mod stage5_score;
pub mod stage6_report;
