pub mod lambda_events;
