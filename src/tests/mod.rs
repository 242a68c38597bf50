mod integration;
mod resolution;
