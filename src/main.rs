use std::io;

use tabiya::Engine;

fn main() -> anyhow::Result<()> {
    tabiya::print_engine_info();
    tabiya::print_binary_info();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    Engine::new(&mut input, &mut output).run()
}
