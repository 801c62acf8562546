//! different utility modules used throughout the project
/// logger initialization and CSV export of graphs and surfaces
pub mod logger;
/// PNG plots of graphs, surfaces and rotation frames
pub mod plots;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
