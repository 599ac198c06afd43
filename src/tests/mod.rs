
mod derived;
mod graph;
mod molecule;
