use mc_2048::game::{play_until, Game, PlayOutcome, WIN_TILE};
use mc_2048::strategy::MonteCarlo;

fn main() {
    let mut rng = rand::thread_rng();
    let mut game = Game::new(&mut rng);
    let mut strategy = MonteCarlo::new();
    println!("{}", game);
    let outcome = play_until(
        &mut game,
        &mut strategy,
        &mut rng,
        |g| g.has_reached(WIN_TILE),
        |g, _| println!("{}", g),
    );
    match outcome {
        PlayOutcome::ConditionMet => println!("You won!"),
        PlayOutcome::GameOver => println!("You lost!"),
    }
    println!(
        "Moves played: {}, Score: {}, Highest tile: {}",
        game.moves(),
        game.score(),
        game.highest_tile()
    );
}
