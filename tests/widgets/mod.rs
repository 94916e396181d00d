mod reconcile;
mod tags;
mod value;
