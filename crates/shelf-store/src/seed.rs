use shelf_types::NewBook;

use crate::error::StoreResult;
use crate::traits::BookStore;

/// Titles loaded into a fresh catalogue, in insertion order.
pub const SEED_TITLES: [&str; 23] = [
    "eBook - Agricultural, Biological, and Food Sciences 2016",
    "eBook - Biochemistry, Genetics and Molecular Biology 2016",
    "eBook - Biomedical Science and Medicine 2016",
    "eBook - Chemical Engineering 2016",
    "eBook - Chemistry 2016",
    "eBook - Computer Science 2016",
    "eBook - Earth and Planetary Sciences 2016",
    "eBook - Energy 2016",
    "eBook - Engineering 2016",
    "eBook - Environmental Science 2016",
    "eBook - Finance 2016",
    "eBook - Forensics and Security 2016",
    "eBook - Health Professions 2016",
    "eBook - Immunology and Microbiology 2016",
    "eBook - Materials Science 2016",
    "eBook - Mathematics 2016",
    "eBook - Neuroscience 2016",
    "eBook - Pharmacology, Toxicology and Pharmaceutical Science 2016",
    "eBook - Physics and Astronomy 2016",
    "eBook - Psychology 2016",
    "eBook - Social Sciences 2016",
    "eBook - Specialty Medicine 2016",
    "eBook - Veterinary Medicine 2016",
];

/// Insert every seed title into `store`. Returns the number inserted.
pub fn seed(store: &dyn BookStore) -> StoreResult<usize> {
    for title in SEED_TITLES {
        store.insert(NewBook::new(title)?)?;
    }
    tracing::info!(count = SEED_TITLES.len(), "seeded book catalogue");
    Ok(SEED_TITLES.len())
}
