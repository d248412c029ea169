//! Interactive petting session.
//!
//! The CLI owns the one mutable cell (the `InteractionSession`) and feeds it
//! discrete keypresses; every derived value on screen comes out of the pure
//! engine functions.

use std::io::{BufRead, Write};

use anyhow::Result;
use dialoguer::Select;
use petpet_client::ApiClient;
use petpet_engine::{DisplayState, InteractionSession, Snapshot};
use petpet_model::Pet;

const BAR_WIDTH: usize = 20;

pub async fn run(client: &ApiClient) -> Result<()> {
    let pets = client.list_pets().await?;
    if pets.is_empty() {
        println!("No pets to play with. Add one with `petpetctl pets add`.");
        return Ok(());
    }

    let mut session = InteractionSession::new();
    let mut selected = choose_pet(&pets)?;
    println!();
    println!("Petting {}. Enter pets, 's' switches pet, 'q' quits.", selected.name);
    render(&selected, session.snapshot());

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        match line?.trim() {
            "q" => break,
            "s" => {
                selected = choose_pet(&pets)?;
                // New pet: the count resets, the peak tally does not.
                let snapshot = session.select_pet();
                println!();
                render(&selected, snapshot);
            }
            _ => {
                let snapshot = session.pet();
                render(&selected, snapshot);
            }
        }
    }
    Ok(())
}

fn choose_pet(pets: &[Pet]) -> Result<Pet> {
    if pets.len() == 1 {
        return Ok(pets[0].clone());
    }
    let labels: Vec<String> = pets
        .iter()
        .map(|pet| format!("{} ({})", pet.name, pet.species))
        .collect();
    let index = Select::new()
        .with_prompt("Which pet?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(pets[index].clone())
}

fn render(pet: &Pet, snapshot: Snapshot) {
    let filled = snapshot.progress as usize * BAR_WIDTH / 100;
    let bar: String = "#".repeat(filled) + &"-".repeat(BAR_WIDTH - filled);

    let image = match snapshot.display {
        DisplayState::Default => pet.default_image_url.as_deref(),
        DisplayState::Alternate => pet.alternate_image_url.as_deref(),
    }
    .unwrap_or("(no image)");

    print!(
        "\r{} petted {} times  [{}] {:>3}%  peaks: {}  {}{}\n",
        pet.name,
        snapshot.count,
        bar,
        snapshot.progress,
        snapshot.peaks,
        image,
        if snapshot.peak_reached { "  ★" } else { "" },
    );
    let _ = std::io::stdout().flush();
}
