pub mod job_graph_dto;
pub mod run_config_dto;
