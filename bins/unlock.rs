mod launch;

fn main() -> std::process::ExitCode {
    launch::launch(server::Deployment::Unlock)
}
