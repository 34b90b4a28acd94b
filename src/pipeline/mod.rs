pub mod stage1_normalize;
pub mod stage2_composite;
pub mod stage3_anomaly;
pub mod stage4_reliability;
pub mod stage5_uncertainty;
pub mod stage6_reweight;
pub mod stage7_report;
