pub mod business_metrics;
