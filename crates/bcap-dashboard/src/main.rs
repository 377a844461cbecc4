#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = bcap_dashboard::run_from_env() {
        bcap_runtime::best_effort_cleanup_for_exit();
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
