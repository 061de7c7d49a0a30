mod helpers;
mod properties;
mod replay_files;
mod scenarios;
