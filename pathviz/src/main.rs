//! pathviz: watch grid search strategies at work.

use pathviz_lib::{RunConfig, config, run};
use pathviz_search::Strategy;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let matches = config::app().get_matches();
    if matches.is_present("list") {
        for strategy in Strategy::menu() {
            println!("{:<10} {}", strategy.key(), strategy);
        }
        return Ok(());
    }

    let cfg = RunConfig::from_matches(&matches)?;
    log::info!("running {} on {:?}", cfg.strategy, cfg.map);
    let mut grid = run::build_grid(&cfg)?;

    let outcome = if cfg.headless {
        let outcome = run::run_headless(cfg.strategy, &mut grid);
        print!("{grid}");
        outcome
    } else {
        run::run_terminal(cfg.strategy, &mut grid, cfg.delay)?
    };
    println!("{outcome}");
    Ok(())
}
