pub mod boleto_model;
pub mod boleto_service;
pub mod normalizer;
