pub mod random_dna;
