mod bmc_tests;
mod machine_tests;
