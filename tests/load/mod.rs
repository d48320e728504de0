mod tests_diagnostics;
mod tests_overwrite;
mod tests_process_env;
