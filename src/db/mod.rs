pub mod flight_queries;
