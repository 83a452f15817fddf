pub mod dijkstra_data;
pub mod distance_queue;
pub mod priority_queue;
